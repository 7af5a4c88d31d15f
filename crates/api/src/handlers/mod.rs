//! HTTP request handlers, grouped by resource.

pub mod adjustments;
pub mod auth;
pub mod notification;
pub mod patterns;
pub mod rotation;

use schichtplan_core::error::CoreError;
use schichtplan_core::rotation::{is_valid_woche, WOCHE_MAX, WOCHE_MIN};

use crate::error::AppError;

/// Reject Woche numbers outside the 1..=15 cycle before they reach a query.
pub(crate) fn validate_woche(woche: i32) -> Result<(), AppError> {
    if !is_valid_woche(woche) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Woche must be between {WOCHE_MIN} and {WOCHE_MAX}, got {woche}"
        ))));
    }
    Ok(())
}
