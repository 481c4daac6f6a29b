//! In-memory credential store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use stepflow_core::error::AppError;
use stepflow_core::result::AppResult;
use stepflow_entity::token::{NewRefreshToken, RefreshToken};
use stepflow_entity::user::{NewUser, User};

use crate::store::CredentialStore;

/// Internal state for the memory-based credential store.
#[derive(Debug, Default)]
struct InnerState {
    /// Users by id.
    users: HashMap<Uuid, User>,
    /// Refresh token rows keyed by bearer string.
    tokens: HashMap<String, RefreshToken>,
}

/// Credential store held entirely in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    state: Arc<Mutex<InnerState>>,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .values()
            .find(|u| u.username.eq_ignore_ascii_case(username) && !u.deleted)
            .cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.users.get(&id).cloned())
    }

    async fn insert_user(&self, user: &NewUser) -> AppResult<User> {
        let mut state = self.state.lock().await;

        if state
            .users
            .values()
            .any(|u| u.username.eq_ignore_ascii_case(&user.username))
        {
            return Err(AppError::conflict(format!(
                "Username '{}' already exists",
                user.username
            )));
        }

        let record = User {
            id: Uuid::new_v4(),
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            role: user.role,
            deleted: false,
            created_at: Utc::now(),
        };
        state.users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn insert_refresh_token(&self, token: &NewRefreshToken) -> AppResult<RefreshToken> {
        let mut state = self.state.lock().await;

        if state.tokens.contains_key(&token.token) {
            return Err(AppError::conflict("Refresh token already exists"));
        }

        let record = RefreshToken {
            id: Uuid::new_v4(),
            user_id: token.user_id,
            token: token.token.clone(),
            created_at: Utc::now(),
            expires_at: token.expires_at,
        };
        state.tokens.insert(record.token.clone(), record.clone());
        Ok(record)
    }

    async fn find_refresh_token(&self, token: &str) -> AppResult<Option<RefreshToken>> {
        let state = self.state.lock().await;
        Ok(state.tokens.get(token).cloned())
    }

    async fn delete_refresh_token(&self, token: &str) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        Ok(state.tokens.remove(token).is_some())
    }
}
