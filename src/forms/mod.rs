//! Form definitions backing the API routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod registration;
pub mod search;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("invalid value for `{0}`")]
    InvalidField(&'static str),
}

/// Reads an optional number the lenient way browsers send it: blank or
/// garbage means "not provided".
pub(crate) fn lenient_number(value: Option<&str>) -> Option<i64> {
    value.and_then(|v| v.trim().parse().ok())
}

/// Interprets a checkbox value.
pub(crate) fn checkbox(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "on" | "true" | "yes")
    )
}
