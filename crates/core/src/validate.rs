//! Required-field checks for slide payloads.
//!
//! Kept as plain functions returning [`CoreError::Validation`] so the
//! engine can reject bad input before any store round-trip.

use crate::error::{CoreError, CoreResult};

/// Check that a required text field is present and non-blank.
pub fn require_text(field: &'static str, value: Option<&str>) -> CoreResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        Some(_) => Err(CoreError::Validation(format!("{field} must not be blank"))),
        None => Err(CoreError::Validation(format!("{field} is required"))),
    }
}

/// Normalize an optional text field: blank strings become `None`.
///
/// Sending `""` for subtitle/description/link_url/button_text clears the
/// field rather than storing an empty string.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
