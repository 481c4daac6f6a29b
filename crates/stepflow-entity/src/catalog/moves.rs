//! Dance move entity and its enumerations.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// How hard a move is to learn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "difficulty", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    VeryHard,
}

/// The couple's hold at the boundary of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "hold_position", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum HoldPosition {
    Closed,
    OpenLeftToRight,
    OpenRightToRight,
    OpenLeftToLeft,
    OpenRightToLeft,
    Sweethearts,
}

/// A single dance move in the shared catalogue.
///
/// Moves may refine a parent move (a variation keeps a reference to the
/// move it is derived from).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DanceMove {
    /// Unique move identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Difficulty rating.
    pub difficulty: Difficulty,
    /// Hold at the start of the move.
    pub start_position: HoldPosition,
    /// Hold at the end of the move.
    pub end_position: HoldPosition,
    /// The move this one is a variation of, if any.
    pub parent_move_id: Option<Uuid>,
}

/// Data required to create a move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDanceMove {
    pub name: String,
    pub description: Option<String>,
    pub difficulty: Difficulty,
    pub start_position: HoldPosition,
    pub end_position: HoldPosition,
    pub parent_move_id: Option<Uuid>,
}

/// Partial update of a move; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDanceMove {
    pub name: Option<String>,
    pub description: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub start_position: Option<HoldPosition>,
    pub end_position: Option<HoldPosition>,
}
