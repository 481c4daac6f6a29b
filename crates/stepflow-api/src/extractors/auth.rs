//! `AuthUser` extractor — the identity attached by the request guard.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use stepflow_core::error::AppError;
use stepflow_entity::user::Role;

use crate::error::ApiError;

/// Identity decoded from the access token, attached to the request by the
/// guard middleware.
#[derive(Debug, Clone, Copy)]
pub struct AuthContext {
    /// Authenticated user ID.
    pub user_id: Uuid,
    /// Role claim at token issuance time.
    pub role: Role,
}

/// Extractor giving handlers the authenticated identity.
///
/// Only usable on routes behind the guard; elsewhere it rejects with 401.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub AuthContext);

impl std::ops::Deref for AuthUser {
    type Target = AuthContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .copied()
            .map(AuthUser)
            .ok_or_else(|| AppError::unauthorized("Request is not authenticated").into())
    }
}
