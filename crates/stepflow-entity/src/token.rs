//! Server-side refresh token records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted refresh token.
///
/// One row is created per login and deleted on logout. The bearer string is
/// unique across all live rows. There is no background sweep; expiry is
/// checked when the token is presented.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshToken {
    /// Unique row identifier.
    pub id: Uuid,
    /// The user this token belongs to.
    pub user_id: Uuid,
    /// The opaque bearer string handed to the client.
    pub token: String,
    /// When the token was issued.
    pub created_at: DateTime<Utc>,
    /// When the token stops being exchangeable.
    pub expires_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Check whether the token is past its expiry.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Data required to persist a new refresh token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRefreshToken {
    /// The user the token is issued to.
    pub user_id: Uuid,
    /// The bearer string.
    pub token: String,
    /// Expiry timestamp.
    pub expires_at: DateTime<Utc>,
}
