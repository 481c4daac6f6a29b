//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use stepflow_auth::jwt::JwtDecoder;
use stepflow_auth::session::SessionService;
use stepflow_core::config::AppConfig;
use stepflow_database::store::CatalogStore;

/// Application state containing all shared dependencies.
///
/// Constructed once at process start and passed to every Axum handler via
/// `State<AppState>`. All fields are `Arc`-wrapped for cheap cloning across
/// tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Dance catalogue persistence.
    pub catalog: Arc<dyn CatalogStore>,
    /// Session lifecycle service.
    pub sessions: Arc<SessionService>,
    /// Access token validator used by the request guard.
    pub decoder: Arc<JwtDecoder>,
}
