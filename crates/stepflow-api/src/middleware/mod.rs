//! Request middleware and role checks.

pub mod guard;
pub mod rbac;
