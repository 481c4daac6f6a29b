//! Dance sequence entity and per-user ratings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A named sequence of moves curated by a user, optionally tied to an event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DanceSequence {
    /// Unique sequence identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// The user who created the sequence.
    pub created_by: Uuid,
    /// The event this sequence was prepared for, if any.
    pub event_id: Option<Uuid>,
    /// When the sequence was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDanceSequence {
    pub name: String,
    pub description: Option<String>,
    pub created_by: Uuid,
    pub event_id: Option<Uuid>,
}

/// One user's score for one sequence. The (sequence, user) pair is unique;
/// re-rating overwrites the previous score.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Rating {
    /// The rated sequence.
    pub sequence_id: Uuid,
    /// The rating user.
    pub user_id: Uuid,
    /// Score from 1 to 5.
    pub score: i16,
}
