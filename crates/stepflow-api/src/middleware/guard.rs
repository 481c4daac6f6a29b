//! Cookie-based request guard.
//!
//! Protected route subtrees are wrapped in [`require_auth`]. The guard is
//! terminal: a request that fails it never reaches a handler. Role
//! membership is enforced by the helpers in [`crate::middleware::rbac`].

use axum::Json;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use tracing::debug;

use crate::cookies::ACCESS_TOKEN_COOKIE;
use crate::extractors::AuthContext;
use crate::state::AppState;

/// Validates the access-token cookie and attaches the caller's identity.
///
/// Responds `401 {"missingToken": true}` when the cookie is absent and
/// `401 {"expiredToken": true}` when it does not verify.
pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(cookie) = jar.get(ACCESS_TOKEN_COOKIE) else {
        return missing_token();
    };

    let claims = match state.decoder.decode_access_token(cookie.value()) {
        Ok(claims) => claims,
        Err(e) => {
            debug!(error = %e, "Rejecting request with unverifiable access token");
            return expired_token();
        }
    };

    request.extensions_mut().insert(AuthContext {
        user_id: claims.user_id(),
        role: claims.role,
    });

    next.run(request).await
}

fn missing_token() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "missingToken": true }))).into_response()
}

fn expired_token() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "expiredToken": true }))).into_response()
}
