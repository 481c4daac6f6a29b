//! In-memory catalogue store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use stepflow_core::error::AppError;
use stepflow_core::result::AppResult;
use stepflow_entity::catalog::{
    DanceMove, DanceSequence, Event, NewDanceMove, NewDanceSequence, NewEvent, UpdateDanceMove,
};

use crate::store::CatalogStore;

/// Internal state for the memory-based catalogue store.
#[derive(Debug, Default)]
struct InnerState {
    moves: HashMap<Uuid, DanceMove>,
    sequences: HashMap<Uuid, DanceSequence>,
    events: HashMap<Uuid, Event>,
    /// Scores keyed by (sequence, user).
    ratings: HashMap<(Uuid, Uuid), i16>,
}

/// Catalogue store held entirely in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalogStore {
    state: Arc<Mutex<InnerState>>,
}

impl MemoryCatalogStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn list_moves(&self) -> AppResult<Vec<DanceMove>> {
        let state = self.state.lock().await;
        let mut moves: Vec<_> = state.moves.values().cloned().collect();
        moves.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(moves)
    }

    async fn find_move(&self, id: Uuid) -> AppResult<Option<DanceMove>> {
        let state = self.state.lock().await;
        Ok(state.moves.get(&id).cloned())
    }

    async fn insert_move(&self, data: &NewDanceMove) -> AppResult<DanceMove> {
        let mut state = self.state.lock().await;
        let record = DanceMove {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            description: data.description.clone(),
            difficulty: data.difficulty,
            start_position: data.start_position,
            end_position: data.end_position,
            parent_move_id: data.parent_move_id,
        };
        state.moves.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_move(&self, id: Uuid, data: &UpdateDanceMove) -> AppResult<DanceMove> {
        let mut state = self.state.lock().await;
        let record = state
            .moves
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Move {id} not found")))?;

        if let Some(name) = &data.name {
            record.name = name.clone();
        }
        if let Some(description) = &data.description {
            record.description = Some(description.clone());
        }
        if let Some(difficulty) = data.difficulty {
            record.difficulty = difficulty;
        }
        if let Some(start) = data.start_position {
            record.start_position = start;
        }
        if let Some(end) = data.end_position {
            record.end_position = end;
        }

        Ok(record.clone())
    }

    async fn delete_move(&self, id: Uuid) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        Ok(state.moves.remove(&id).is_some())
    }

    async fn list_sequences(&self) -> AppResult<Vec<DanceSequence>> {
        let state = self.state.lock().await;
        let mut sequences: Vec<_> = state.sequences.values().cloned().collect();
        sequences.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sequences)
    }

    async fn find_sequence(&self, id: Uuid) -> AppResult<Option<DanceSequence>> {
        let state = self.state.lock().await;
        Ok(state.sequences.get(&id).cloned())
    }

    async fn insert_sequence(&self, data: &NewDanceSequence) -> AppResult<DanceSequence> {
        let mut state = self.state.lock().await;
        let record = DanceSequence {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            description: data.description.clone(),
            created_by: data.created_by,
            event_id: data.event_id,
            created_at: Utc::now(),
        };
        state.sequences.insert(record.id, record.clone());
        Ok(record)
    }

    async fn delete_sequence(&self, id: Uuid) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        let removed = state.sequences.remove(&id).is_some();
        if removed {
            state.ratings.retain(|(seq, _), _| *seq != id);
        }
        Ok(removed)
    }

    async fn upsert_rating(&self, sequence_id: Uuid, user_id: Uuid, score: i16) -> AppResult<()> {
        let mut state = self.state.lock().await;
        if !state.sequences.contains_key(&sequence_id) {
            return Err(AppError::not_found(format!(
                "Sequence {sequence_id} not found"
            )));
        }
        state.ratings.insert((sequence_id, user_id), score);
        Ok(())
    }

    async fn average_rating(&self, sequence_id: Uuid) -> AppResult<Option<f64>> {
        let state = self.state.lock().await;
        let scores: Vec<i16> = state
            .ratings
            .iter()
            .filter(|((seq, _), _)| *seq == sequence_id)
            .map(|(_, score)| *score)
            .collect();

        if scores.is_empty() {
            return Ok(None);
        }
        let sum: i64 = scores.iter().map(|s| *s as i64).sum();
        Ok(Some(sum as f64 / scores.len() as f64))
    }

    async fn list_events(&self) -> AppResult<Vec<Event>> {
        let state = self.state.lock().await;
        let mut events: Vec<_> = state.events.values().cloned().collect();
        // Undated events sort last, like the SQL backend.
        events.sort_by_key(|e| (e.starts_at.is_none(), e.starts_at));
        Ok(events)
    }

    async fn find_event(&self, id: Uuid) -> AppResult<Option<Event>> {
        let state = self.state.lock().await;
        Ok(state.events.get(&id).cloned())
    }

    async fn insert_event(&self, data: &NewEvent) -> AppResult<Event> {
        let mut state = self.state.lock().await;
        let record = Event {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            location: data.location.clone(),
            starts_at: data.starts_at,
        };
        state.events.insert(record.id, record.clone());
        Ok(record)
    }

    async fn delete_event(&self, id: Uuid) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        Ok(state.events.remove(&id).is_some())
    }
}
