//! Session lifecycle service — signup, login, refresh, and logout flows.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use stepflow_core::config::auth::AuthConfig;
use stepflow_core::error::AppError;
use stepflow_database::store::CredentialStore;
use stepflow_entity::token::NewRefreshToken;
use stepflow_entity::user::{NewUser, Role, User};

use crate::jwt::encoder::TokenPair;
use crate::jwt::{JwtDecoder, JwtEncoder};
use crate::password::{PasswordHasher, PasswordValidator};

/// Unified login failure message; unknown username and wrong password are
/// indistinguishable to the caller.
const BAD_CREDENTIALS: &str = "Invalid username or password";

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// Generated token pair.
    pub tokens: TokenPair,
    /// The authenticated user.
    pub user: User,
}

/// Orchestrates the complete session lifecycle.
///
/// The service itself is stateless: everything it knows lives behind the
/// credential store, and token validity is proven cryptographically.
#[derive(Clone)]
pub struct SessionService {
    /// Credential persistence.
    store: Arc<dyn CredentialStore>,
    /// Password hasher.
    hasher: PasswordHasher,
    /// Signup password policy.
    password_policy: PasswordValidator,
    /// Token creation.
    encoder: JwtEncoder,
    /// Token validation.
    decoder: JwtDecoder,
}

impl std::fmt::Debug for SessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionService")
            .field("encoder", &self.encoder)
            .finish()
    }
}

impl SessionService {
    /// Creates a new session service over the given store and configuration.
    pub fn new(store: Arc<dyn CredentialStore>, config: &AuthConfig) -> Self {
        Self {
            store,
            hasher: PasswordHasher::new(),
            password_policy: PasswordValidator::new(config),
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
        }
    }

    /// Registers a new user with role `User`.
    ///
    /// Does not log the user in; callers chain a `login` when they want a
    /// session.
    pub async fn signup(&self, username: &str, password: &str) -> Result<User, AppError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::validation("Username is required"));
        }
        self.password_policy.validate(password)?;

        if self.store.find_user_by_username(username).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Username '{username}' already exists"
            )));
        }

        let password_hash = self.hasher.hash(password)?;
        let user = self
            .store
            .insert_user(&NewUser {
                username: username.to_string(),
                password_hash,
                role: Role::User,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User signed up");
        Ok(user)
    }

    /// Performs the login flow:
    ///
    /// 1. Resolve the user by username
    /// 2. Verify the password
    /// 3. Issue an access + refresh token pair
    /// 4. Persist the refresh token row
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AppError> {
        let user = self
            .store
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| AppError::invalid_credentials(BAD_CREDENTIALS))?;

        let password_valid = self.hasher.verify(password, &user.password_hash)?;
        if !password_valid {
            warn!(user_id = %user.id, "Login rejected: password mismatch");
            return Err(AppError::invalid_credentials(BAD_CREDENTIALS));
        }

        let tokens = self.encoder.generate_token_pair(user.id, user.role)?;

        // Concurrent logins are allowed; each gets its own row.
        self.store
            .insert_refresh_token(&NewRefreshToken {
                user_id: user.id,
                token: tokens.refresh_token.clone(),
                expires_at: tokens.refresh_expires_at,
            })
            .await?;

        info!(user_id = %user.id, "Login successful");
        Ok(LoginResult { tokens, user })
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// The stored row must exist and be unexpired, and the token string
    /// itself must verify against the refresh secret. The refresh token is
    /// not rotated; it stays valid until logout or expiry.
    pub async fn refresh(&self, refresh_token: &str) -> Result<(String, DateTime<Utc>), AppError> {
        let row = self
            .store
            .find_refresh_token(refresh_token)
            .await?
            .ok_or_else(|| AppError::not_found("Refresh token does not exist"))?;

        if row.is_expired() {
            return Err(AppError::unauthorized("Refresh token has expired"));
        }

        let claims = self.decoder.decode_refresh_token(refresh_token)?;

        let (access_token, expires_at) = self
            .encoder
            .generate_access_token(claims.user_id(), claims.role)?;

        debug!(user_id = %claims.user_id(), "Access token refreshed");
        Ok((access_token, expires_at))
    }

    /// Ends the session owning the given refresh token.
    ///
    /// Idempotent: logging out a token that was never stored is not an error.
    pub async fn logout(&self, refresh_token: &str) -> Result<(), AppError> {
        let removed = self.store.delete_refresh_token(refresh_token).await?;
        if removed {
            info!("Session terminated");
        }
        Ok(())
    }

    /// Resolves the user behind an access token.
    ///
    /// Returns `None` on any failure; a missing, invalid, or expired token
    /// is simply an anonymous caller, never an error.
    pub async fn current_user(&self, access_token: Option<&str>) -> Option<User> {
        let token = access_token?;

        let claims = match self.decoder.decode_access_token(token) {
            Ok(claims) => claims,
            Err(e) => {
                debug!(error = %e, "Ignoring invalid access token");
                return None;
            }
        };

        match self.store.find_user_by_id(claims.user_id()).await {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "User lookup failed while resolving current user");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepflow_core::error::ErrorKind;
    use stepflow_database::memory::MemoryCredentialStore;

    fn test_service() -> SessionService {
        let config = AuthConfig {
            access_token_secret: "access-secret-for-tests".to_string(),
            refresh_token_secret: "refresh-secret-for-tests".to_string(),
            ..AuthConfig::default()
        };
        SessionService::new(Arc::new(MemoryCredentialStore::new()), &config)
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let service = test_service();

        let user = service.signup("alice", "secret1").await.unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.role, Role::User);
        assert_ne!(user.password_hash, "secret1");

        let result = service.login("alice", "secret1").await.unwrap();
        assert!(!result.tokens.access_token.is_empty());
        assert!(!result.tokens.refresh_token.is_empty());
        assert_ne!(result.tokens.access_token, result.tokens.refresh_token);
    }

    #[tokio::test]
    async fn test_signup_duplicate_username_conflicts() {
        let service = test_service();
        service.signup("alice", "secret1").await.unwrap();

        let err = service.signup("alice", "another1").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_login_failures_are_uniform() {
        let service = test_service();
        service.signup("alice", "secret1").await.unwrap();

        let unknown = service.login("bob", "secret1").await.unwrap_err();
        let wrong = service.login("alice", "wrong-pass").await.unwrap_err();

        assert_eq!(unknown.kind, ErrorKind::InvalidCredentials);
        assert_eq!(wrong.kind, ErrorKind::InvalidCredentials);
        // No username enumeration through differing messages.
        assert_eq!(unknown.message, wrong.message);
    }

    #[tokio::test]
    async fn test_refresh_issues_new_access_token() {
        let service = test_service();
        service.signup("alice", "secret1").await.unwrap();
        let login = service.login("alice", "secret1").await.unwrap();

        let (access_token, _expires_at) =
            service.refresh(&login.tokens.refresh_token).await.unwrap();

        let user = service.current_user(Some(&access_token)).await.unwrap();
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_refresh_unknown_token_fails() {
        let service = test_service();
        let err = service.refresh("never-issued").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_refresh_tampered_token_fails_verification() {
        let service = test_service();
        service.signup("alice", "secret1").await.unwrap();
        let login = service.login("alice", "secret1").await.unwrap();

        // Store a corrupted copy server-side to separate the presence check
        // from cryptographic verification.
        let mut tampered = login.tokens.refresh_token.clone();
        tampered.push('x');
        service
            .store
            .insert_refresh_token(&NewRefreshToken {
                user_id: login.user.id,
                token: tampered.clone(),
                expires_at: login.tokens.refresh_expires_at,
            })
            .await
            .unwrap();

        let err = service.refresh(&tampered).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn test_logout_then_refresh_fails() {
        let service = test_service();
        service.signup("alice", "secret1").await.unwrap();
        let login = service.login("alice", "secret1").await.unwrap();

        service.logout(&login.tokens.refresh_token).await.unwrap();
        assert!(service.refresh(&login.tokens.refresh_token).await.is_err());

        // And logging out again is fine.
        service.logout(&login.tokens.refresh_token).await.unwrap();
    }

    #[tokio::test]
    async fn test_current_user_with_bad_token_is_anonymous() {
        let service = test_service();
        assert!(service.current_user(None).await.is_none());
        assert!(service.current_user(Some("garbage")).await.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_logins_each_get_a_session() {
        let service = test_service();
        service.signup("alice", "secret1").await.unwrap();

        let first = service.login("alice", "secret1").await.unwrap();
        let second = service.login("alice", "secret1").await.unwrap();

        // Both refresh tokens stay usable independently.
        service.refresh(&first.tokens.refresh_token).await.unwrap();
        service.refresh(&second.tokens.refresh_token).await.unwrap();

        service.logout(&first.tokens.refresh_token).await.unwrap();
        assert!(service.refresh(&first.tokens.refresh_token).await.is_err());
        service.refresh(&second.tokens.refresh_token).await.unwrap();
    }
}
