//! Dance move handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use stepflow_core::error::AppError;
use stepflow_entity::catalog::{DanceMove, NewDanceMove, UpdateDanceMove};

use crate::dto::request::{CreateMoveRequest, UpdateMoveRequest};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::middleware::rbac;
use crate::state::AppState;

/// GET /dance-moves
pub async fn list_moves(State(state): State<AppState>) -> Result<Json<Vec<DanceMove>>, ApiError> {
    Ok(Json(state.catalog.list_moves().await?))
}

/// GET /dance-moves/{id}
pub async fn get_move(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DanceMove>, ApiError> {
    let dance_move = state
        .catalog
        .find_move(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Move {id} not found")))?;

    Ok(Json(dance_move))
}

/// POST /dance-moves (admin)
pub async fn create_move(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateMoveRequest>,
) -> Result<(StatusCode, Json<DanceMove>), ApiError> {
    rbac::require_admin(&auth)?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    if let Some(parent_id) = req.parent_move_id {
        state
            .catalog
            .find_move(parent_id)
            .await?
            .ok_or_else(|| AppError::validation(format!("Parent move {parent_id} not found")))?;
    }

    let created = state
        .catalog
        .insert_move(&NewDanceMove {
            name: req.name,
            description: req.description,
            difficulty: req.difficulty,
            start_position: req.start_position,
            end_position: req.end_position,
            parent_move_id: req.parent_move_id,
        })
        .await?;

    tracing::info!(move_id = %created.id, user_id = %auth.user_id, "Move created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /dance-moves/{id} (admin)
pub async fn update_move(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateMoveRequest>,
) -> Result<Json<DanceMove>, ApiError> {
    rbac::require_admin(&auth)?;

    let updated = state
        .catalog
        .update_move(
            id,
            &UpdateDanceMove {
                name: req.name,
                description: req.description,
                difficulty: req.difficulty,
                start_position: req.start_position,
                end_position: req.end_position,
            },
        )
        .await?;

    Ok(Json(updated))
}

/// DELETE /dance-moves/{id} (admin)
pub async fn delete_move(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    rbac::require_admin(&auth)?;

    if !state.catalog.delete_move(id).await? {
        return Err(AppError::not_found(format!("Move {id} not found")).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
