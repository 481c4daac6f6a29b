//! # stepflow-entity
//!
//! Domain models shared across the Stepflow crates.
//!
//! - `user` — registered users and their roles
//! - `token` — server-side refresh token records
//! - `catalog` — dance moves, sequences, ratings, and events

pub mod catalog;
pub mod token;
pub mod user;

pub use catalog::{DanceMove, DanceSequence, Difficulty, Event, HoldPosition, Rating};
pub use token::{NewRefreshToken, RefreshToken};
pub use user::{NewUser, Role, User};
