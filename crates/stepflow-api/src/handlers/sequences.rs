//! Dance sequence handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use stepflow_core::error::AppError;
use stepflow_entity::catalog::{DanceSequence, NewDanceSequence};

use crate::dto::request::{CreateSequenceRequest, RateSequenceRequest};
use crate::dto::response::RatingResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /dance-sequences
pub async fn list_sequences(
    State(state): State<AppState>,
) -> Result<Json<Vec<DanceSequence>>, ApiError> {
    Ok(Json(state.catalog.list_sequences().await?))
}

/// GET /dance-sequences/{id}
pub async fn get_sequence(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DanceSequence>, ApiError> {
    let sequence = state
        .catalog
        .find_sequence(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Sequence {id} not found")))?;

    Ok(Json(sequence))
}

/// POST /dance-sequences
///
/// Any authenticated user may create a sequence; the caller becomes its owner.
pub async fn create_sequence(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateSequenceRequest>,
) -> Result<(StatusCode, Json<DanceSequence>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    if let Some(event_id) = req.event_id {
        state
            .catalog
            .find_event(event_id)
            .await?
            .ok_or_else(|| AppError::validation(format!("Event {event_id} not found")))?;
    }

    let created = state
        .catalog
        .insert_sequence(&NewDanceSequence {
            name: req.name,
            description: req.description,
            created_by: auth.user_id,
            event_id: req.event_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /dance-sequences/{id}
///
/// Only the sequence owner or an admin may delete.
pub async fn delete_sequence(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let sequence = state
        .catalog
        .find_sequence(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Sequence {id} not found")))?;

    if sequence.created_by != auth.user_id && !auth.role.is_admin() {
        return Err(
            AppError::forbidden("Only the creator or an admin can delete a sequence").into(),
        );
    }

    state.catalog.delete_sequence(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /dance-sequences/{id}/rating
///
/// Upserts the caller's score and returns the new average.
pub async fn rate_sequence(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<RateSequenceRequest>,
) -> Result<Json<RatingResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state
        .catalog
        .find_sequence(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Sequence {id} not found")))?;

    state
        .catalog
        .upsert_rating(id, auth.user_id, req.score)
        .await?;
    let average_score = state.catalog.average_rating(id).await?;

    Ok(Json(RatingResponse { average_score }))
}
