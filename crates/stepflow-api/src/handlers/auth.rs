//! Auth handlers — signup, login, logout, refresh, me.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use stepflow_core::error::{AppError, ErrorKind};

use crate::cookies::{ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, auth_cookie, removal_cookie};
use crate::dto::request::{LoginRequest, SignupRequest};
use crate::dto::response::{MessageResponse, RefreshResponse, UserResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state.sessions.signup(&req.username, &req.password).await?;

    Ok(Json(MessageResponse {
        message: "Signup successful".to_string(),
    }))
}

/// POST /auth/login
///
/// Sets the `accessToken` and `refreshToken` cookies on success.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<UserResponse>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let result = state.sessions.login(&req.username, &req.password).await?;

    let auth_config = &state.config.auth;
    let jar = jar
        .add(auth_cookie(
            ACCESS_TOKEN_COOKIE,
            result.tokens.access_token.clone(),
            auth_config,
        ))
        .add(auth_cookie(
            REFRESH_TOKEN_COOKIE,
            result.tokens.refresh_token.clone(),
            auth_config,
        ));

    Ok((jar, Json(UserResponse::from(result.user))))
}

/// POST /auth/logout
///
/// Clears both cookies and deletes the server-side refresh record.
/// Idempotent; logging out without a session is still a 200.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageResponse>), ApiError> {
    if let Some(cookie) = jar.get(REFRESH_TOKEN_COOKIE) {
        state.sessions.logout(cookie.value()).await?;
    }

    let auth_config = &state.config.auth;
    let jar = jar
        .add(removal_cookie(ACCESS_TOKEN_COOKIE, auth_config))
        .add(removal_cookie(REFRESH_TOKEN_COOKIE, auth_config));

    Ok((
        jar,
        Json(MessageResponse {
            message: "Logged out".to_string(),
        }),
    ))
}

/// POST /auth/refresh
///
/// Exchanges the `refreshToken` cookie for a new access token; the refreshed
/// `accessToken` cookie is set alongside the JSON body.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<RefreshResponse>), ApiError> {
    let refresh_token = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or_else(|| AppError::validation("Refresh token is required"))?;

    let (new_access_token, _expires_at) =
        state
            .sessions
            .refresh(&refresh_token)
            .await
            .map_err(|e| match e.kind {
                // Infrastructure failures stay a 500; everything else about
                // the token itself is a plain 401 with no detail.
                ErrorKind::Database | ErrorKind::Internal => e,
                _ => AppError::unauthorized("Invalid refresh token"),
            })?;

    let jar = jar.add(auth_cookie(
        ACCESS_TOKEN_COOKIE,
        new_access_token.clone(),
        &state.config.auth,
    ));

    Ok((jar, Json(RefreshResponse { new_access_token })))
}

/// GET /auth/me
///
/// Resolves the caller from the `accessToken` cookie; anonymous callers get
/// `null` rather than an error.
pub async fn me(State(state): State<AppState>, jar: CookieJar) -> Json<Option<UserResponse>> {
    let token = jar.get(ACCESS_TOKEN_COOKIE).map(|c| c.value().to_string());

    let user = state.sessions.current_user(token.as_deref()).await;
    Json(user.map(UserResponse::from))
}
