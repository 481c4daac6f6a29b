//! Event entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A dance event sequences can be prepared for.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    /// Unique event identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Venue or city.
    pub location: Option<String>,
    /// When the event takes place.
    pub starts_at: Option<DateTime<Utc>>,
}

/// Data required to create an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    pub name: String,
    pub location: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
}
