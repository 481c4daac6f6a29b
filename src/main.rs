//! Stepflow server — dance catalogue platform.
//!
//! Main entry point that wires all crates together and starts the server.
//! The dependency graph is constructed once, here, and handed to the router;
//! there is no global registry.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use stepflow_auth::jwt::JwtDecoder;
use stepflow_auth::session::SessionService;
use stepflow_core::config::AppConfig;
use stepflow_core::error::AppError;
use stepflow_database::memory::{MemoryCatalogStore, MemoryCredentialStore};
use stepflow_database::postgres::{PostgresCatalogStore, PostgresCredentialStore};
use stepflow_database::store::{CatalogStore, CredentialStore};

#[tokio::main]
async fn main() {
    let env = std::env::var("STEPFLOW_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Stepflow v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Storage backends ─────────────────────────────────
    let (credentials, catalog) = build_stores(&config).await?;

    // ── Step 2: Auth system ──────────────────────────────────────
    let sessions = Arc::new(SessionService::new(credentials, &config.auth));
    let decoder = Arc::new(JwtDecoder::new(&config.auth));

    // ── Step 3: HTTP server ──────────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = stepflow_api::state::AppState {
        config: Arc::new(config),
        catalog,
        sessions,
        decoder,
    };

    let app = stepflow_api::router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Stepflow server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("Stepflow server shut down gracefully");
    Ok(())
}

/// Construct the configured storage backend.
async fn build_stores(
    config: &AppConfig,
) -> Result<(Arc<dyn CredentialStore>, Arc<dyn CatalogStore>), AppError> {
    match config.database.provider.as_str() {
        "postgres" => {
            tracing::info!("Connecting to database...");
            let pool = stepflow_database::connection::create_pool(&config.database).await?;

            stepflow_database::migration::run_migrations(&pool).await?;

            Ok((
                Arc::new(PostgresCredentialStore::new(pool.clone())),
                Arc::new(PostgresCatalogStore::new(pool)),
            ))
        }
        "memory" => {
            tracing::warn!("Using the in-memory store; all data is lost on restart");
            Ok((
                Arc::new(MemoryCredentialStore::new()),
                Arc::new(MemoryCatalogStore::new()),
            ))
        }
        other => Err(AppError::configuration(format!(
            "Unknown database provider '{other}'. Expected 'postgres' or 'memory'"
        ))),
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
