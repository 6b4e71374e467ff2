//! # Middleware Components
//!
//! Cross-cutting request processing, currently the scope-based authorization
//! guard for mutating routes.

pub mod auth;

pub use auth::{ScopeGuard, authorize};
