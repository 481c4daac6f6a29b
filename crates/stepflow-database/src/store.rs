//! Store traits consumed by the service layer.
//!
//! All operations are atomic single-row reads or writes; nothing here
//! requires a multi-row transaction.

use async_trait::async_trait;
use uuid::Uuid;

use stepflow_core::result::AppResult;
use stepflow_entity::catalog::{
    DanceMove, DanceSequence, Event, NewDanceMove, NewDanceSequence, NewEvent, UpdateDanceMove,
};
use stepflow_entity::token::{NewRefreshToken, RefreshToken};
use stepflow_entity::user::{NewUser, User};

/// Persistence of users and refresh tokens.
///
/// The session service holds no state of its own; everything it knows about
/// identities goes through this interface.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up a live (non-deleted) user by username.
    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Look up a user by primary key.
    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Insert a new user. Fails with `Conflict` when the username is taken.
    async fn insert_user(&self, user: &NewUser) -> AppResult<User>;

    /// Persist a refresh token row.
    async fn insert_refresh_token(&self, token: &NewRefreshToken) -> AppResult<RefreshToken>;

    /// Look up a refresh token row by its bearer string.
    async fn find_refresh_token(&self, token: &str) -> AppResult<Option<RefreshToken>>;

    /// Delete a refresh token row. Returns whether a row was removed.
    async fn delete_refresh_token(&self, token: &str) -> AppResult<bool>;
}

/// Persistence of the dance catalogue.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    // -- Moves --
    async fn list_moves(&self) -> AppResult<Vec<DanceMove>>;
    async fn find_move(&self, id: Uuid) -> AppResult<Option<DanceMove>>;
    async fn insert_move(&self, data: &NewDanceMove) -> AppResult<DanceMove>;
    /// Apply a partial update. Fails with `NotFound` when the move is missing.
    async fn update_move(&self, id: Uuid, data: &UpdateDanceMove) -> AppResult<DanceMove>;
    async fn delete_move(&self, id: Uuid) -> AppResult<bool>;

    // -- Sequences --
    async fn list_sequences(&self) -> AppResult<Vec<DanceSequence>>;
    async fn find_sequence(&self, id: Uuid) -> AppResult<Option<DanceSequence>>;
    async fn insert_sequence(&self, data: &NewDanceSequence) -> AppResult<DanceSequence>;
    async fn delete_sequence(&self, id: Uuid) -> AppResult<bool>;

    /// Record one user's score for a sequence, replacing any previous score.
    async fn upsert_rating(&self, sequence_id: Uuid, user_id: Uuid, score: i16) -> AppResult<()>;
    /// Average score for a sequence, `None` when it has no ratings.
    async fn average_rating(&self, sequence_id: Uuid) -> AppResult<Option<f64>>;

    // -- Events --
    async fn list_events(&self) -> AppResult<Vec<Event>>;
    async fn find_event(&self, id: Uuid) -> AppResult<Option<Event>>;
    async fn insert_event(&self, data: &NewEvent) -> AppResult<Event>;
    async fn delete_event(&self, id: Uuid) -> AppResult<bool>;
}
