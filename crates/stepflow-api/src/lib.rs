//! # stepflow-api
//!
//! HTTP API layer for Stepflow built on Axum.
//!
//! Provides the REST endpoints, the cookie-based request guard, extractors,
//! DTOs, and error mapping. Routes and their role requirements are declared
//! explicitly when the router is built.

pub mod cookies;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
