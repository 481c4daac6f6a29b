//! Event handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use stepflow_core::error::AppError;
use stepflow_entity::catalog::{Event, NewEvent};

use crate::dto::request::CreateEventRequest;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::middleware::rbac;
use crate::state::AppState;

/// GET /events
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, ApiError> {
    Ok(Json(state.catalog.list_events().await?))
}

/// GET /events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Event>, ApiError> {
    let event = state
        .catalog
        .find_event(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Event {id} not found")))?;

    Ok(Json(event))
}

/// POST /events (admin)
pub async fn create_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    rbac::require_admin(&auth)?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let created = state
        .catalog
        .insert_event(&NewEvent {
            name: req.name,
            location: req.location,
            starts_at: req.starts_at,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /events/{id} (admin)
pub async fn delete_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    rbac::require_admin(&auth)?;

    if !state.catalog.delete_event(id).await? {
        return Err(AppError::not_found(format!("Event {id} not found")).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
