//! # stepflow-auth
//!
//! Authentication core for Stepflow.
//!
//! ## Modules
//!
//! - `password` — Argon2id password hashing and the signup password policy
//! - `jwt` — access/refresh token creation and validation
//! - `session` — the session lifecycle (signup, login, refresh, logout)

pub mod jwt;
pub mod password;
pub mod session;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair};
pub use password::{PasswordHasher, PasswordValidator};
pub use session::SessionService;
