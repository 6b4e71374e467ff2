//! # Utility Modules
//!
//! Helpers shared by the handlers and services.
//!
//! ## Available Utilities
//!
//! - **Constants** (`constant`) - Configuration defaults and fixed strings
//! - **JSON** (`json`) - Document containment used by the in-memory search
//! - **Secrets** (`secret`) - Inline-or-file secret resolution
//! - **Validators** (`validator`) - Regex patterns for payload validation

pub mod constant;
pub mod json;
pub mod secret;
pub mod validator;
