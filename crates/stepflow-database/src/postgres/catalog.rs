//! PostgreSQL-backed catalogue store.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use stepflow_core::error::{AppError, ErrorKind};
use stepflow_core::result::AppResult;
use stepflow_entity::catalog::{
    DanceMove, DanceSequence, Event, NewDanceMove, NewDanceSequence, NewEvent, UpdateDanceMove,
};

use crate::store::CatalogStore;

/// Catalogue store backed by the `dance_moves`, `dance_sequences`,
/// `sequence_ratings`, and `events` tables.
#[derive(Debug, Clone)]
pub struct PostgresCatalogStore {
    pool: PgPool,
}

impl PostgresCatalogStore {
    /// Create a new store over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PostgresCatalogStore {
    async fn list_moves(&self) -> AppResult<Vec<DanceMove>> {
        sqlx::query_as::<_, DanceMove>("SELECT * FROM dance_moves ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list moves", e))
    }

    async fn find_move(&self, id: Uuid) -> AppResult<Option<DanceMove>> {
        sqlx::query_as::<_, DanceMove>("SELECT * FROM dance_moves WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find move", e))
    }

    async fn insert_move(&self, data: &NewDanceMove) -> AppResult<DanceMove> {
        sqlx::query_as::<_, DanceMove>(
            "INSERT INTO dance_moves \
             (name, description, difficulty, start_position, end_position, parent_move_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.difficulty)
        .bind(data.start_position)
        .bind(data.end_position)
        .bind(data.parent_move_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create move", e))
    }

    async fn update_move(&self, id: Uuid, data: &UpdateDanceMove) -> AppResult<DanceMove> {
        sqlx::query_as::<_, DanceMove>(
            "UPDATE dance_moves SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                difficulty = COALESCE($4, difficulty), \
                start_position = COALESCE($5, start_position), \
                end_position = COALESCE($6, end_position) \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.difficulty)
        .bind(data.start_position)
        .bind(data.end_position)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update move", e))?
        .ok_or_else(|| AppError::not_found(format!("Move {id} not found")))
    }

    async fn delete_move(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM dance_moves WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete move", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_sequences(&self) -> AppResult<Vec<DanceSequence>> {
        sqlx::query_as::<_, DanceSequence>(
            "SELECT * FROM dance_sequences ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list sequences", e))
    }

    async fn find_sequence(&self, id: Uuid) -> AppResult<Option<DanceSequence>> {
        sqlx::query_as::<_, DanceSequence>("SELECT * FROM dance_sequences WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find sequence", e))
    }

    async fn insert_sequence(&self, data: &NewDanceSequence) -> AppResult<DanceSequence> {
        sqlx::query_as::<_, DanceSequence>(
            "INSERT INTO dance_sequences (name, description, created_by, event_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.created_by)
        .bind(data.event_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create sequence", e))
    }

    async fn delete_sequence(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM dance_sequences WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete sequence", e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn upsert_rating(&self, sequence_id: Uuid, user_id: Uuid, score: i16) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO sequence_ratings (sequence_id, user_id, score) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (sequence_id, user_id) DO UPDATE SET score = EXCLUDED.score",
        )
        .bind(sequence_id)
        .bind(user_id)
        .bind(score)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to store rating", e))?;

        Ok(())
    }

    async fn average_rating(&self, sequence_id: Uuid) -> AppResult<Option<f64>> {
        sqlx::query_scalar::<_, Option<f64>>(
            "SELECT AVG(score)::float8 FROM sequence_ratings WHERE sequence_id = $1",
        )
        .bind(sequence_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to average ratings", e))
    }

    async fn list_events(&self) -> AppResult<Vec<Event>> {
        sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY starts_at ASC NULLS LAST")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list events", e))
    }

    async fn find_event(&self, id: Uuid) -> AppResult<Option<Event>> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find event", e))
    }

    async fn insert_event(&self, data: &NewEvent) -> AppResult<Event> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events (name, location, starts_at) \
             VALUES ($1, $2, $3) \
             RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.location)
        .bind(data.starts_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create event", e))
    }

    async fn delete_event(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete event", e))?;

        Ok(result.rows_affected() > 0)
    }
}
