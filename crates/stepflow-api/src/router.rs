//! Route definitions for the Stepflow HTTP API.
//!
//! Every route is declared here, at startup; there is no runtime route
//! discovery. The router receives `AppState` and passes it to all handlers
//! via Axum's `State` extractor.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::guard;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let public = Router::new().merge(auth_routes()).merge(health_routes());

    let protected = catalog_routes().layer(axum_middleware::from_fn_with_state(
        state.clone(),
        guard::require_auth,
    ));

    let cors = build_cors_layer(&state);

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Session endpoints: signup, login, logout, refresh, me.
///
/// These stay outside the guard; they are how a caller becomes
/// authenticated in the first place.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/me", get(handlers::auth::me))
}

/// Catalogue endpoints, all behind the guard. Reads are open to any
/// authenticated identity; mutations of the shared catalogue declare an
/// Admin requirement in their handlers.
fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/dance-moves",
            get(handlers::moves::list_moves).post(handlers::moves::create_move),
        )
        .route(
            "/dance-moves/{id}",
            get(handlers::moves::get_move)
                .put(handlers::moves::update_move)
                .delete(handlers::moves::delete_move),
        )
        .route(
            "/dance-sequences",
            get(handlers::sequences::list_sequences).post(handlers::sequences::create_sequence),
        )
        .route(
            "/dance-sequences/{id}",
            get(handlers::sequences::get_sequence).delete(handlers::sequences::delete_sequence),
        )
        .route(
            "/dance-sequences/{id}/rating",
            put(handlers::sequences::rate_sequence),
        )
        .route(
            "/events",
            get(handlers::events::list_events).post(handlers::events::create_event),
        )
        .route(
            "/events/{id}",
            get(handlers::events::get_event).delete(handlers::events::delete_event),
        )
}

/// Health check endpoint (no auth required).
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Build the CORS layer from configuration.
///
/// Cookie-based auth requires credentials, which in turn requires explicit
/// origins; the wildcard origin is only usable credential-less.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::{HeaderValue, Method, header};
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new().allow_headers([header::CONTENT_TYPE]);

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins).allow_credentials(true);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    cors.max_age(std::time::Duration::from_secs(cors_config.max_age_seconds))
}
