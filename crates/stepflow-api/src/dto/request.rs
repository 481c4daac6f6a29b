//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use stepflow_entity::catalog::{Difficulty, HoldPosition};

/// Signup request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    /// Desired username.
    #[validate(length(min = 1, max = 100, message = "Username is required"))]
    pub username: String,
    /// Password; length policy is enforced by the session service.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Create dance move request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateMoveRequest {
    /// Move name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Difficulty rating.
    pub difficulty: Difficulty,
    /// Hold at the start of the move.
    pub start_position: HoldPosition,
    /// Hold at the end of the move.
    pub end_position: HoldPosition,
    /// Parent move for variations.
    pub parent_move_id: Option<Uuid>,
}

/// Partial dance move update request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMoveRequest {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New difficulty.
    pub difficulty: Option<Difficulty>,
    /// New start hold.
    pub start_position: Option<HoldPosition>,
    /// New end hold.
    pub end_position: Option<HoldPosition>,
}

/// Create sequence request. The creator is taken from the caller's identity.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSequenceRequest {
    /// Sequence name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Event the sequence is prepared for.
    pub event_id: Option<Uuid>,
}

/// Rate a sequence.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RateSequenceRequest {
    /// Score from 1 to 5.
    #[validate(range(min = 1, max = 5))]
    pub score: i16,
}

/// Create event request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEventRequest {
    /// Event name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Venue or city.
    pub location: Option<String>,
    /// When the event takes place.
    pub starts_at: Option<DateTime<Utc>>,
}
