//! # Text Input Validation Utilities
//!
//! Patterns referenced from `#[validate(regex(...))]` attributes on the
//! data-center payload.

use std::sync::LazyLock;

use regex::Regex;

/// ISO 3166-1 alpha-2 country code, upper case.
///
/// # Examples
///
/// - `CA` ✓ Valid
/// - `ca` ✗ Invalid
/// - `CAN` ✗ Invalid
pub static COUNTRY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}$").expect("Failed to compile country regex"));

/// Center identifiers are short codes such as `DCC` or `COLLAB-UK`.
pub static CENTER_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]*$").expect("Failed to compile center id regex")
});
