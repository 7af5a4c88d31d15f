//! Flexible shift-time adjustment arithmetic and bounds.
//!
//! An adjustment shifts a pattern's start/end window for one shift type on
//! one date by a signed number of minutes. The arithmetic goes through a
//! full date-time so an adjustment past midnight rolls over to the next day
//! instead of producing an invalid time.

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// Largest permitted adjustment magnitude, in minutes.
pub const MAX_ADJUSTMENT_MINUTES: i32 = 60;

/// Adjustments must be a multiple of this step, in minutes.
pub const ADJUSTMENT_STEP_MINUTES: i32 = 15;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate the adjustment offset: within `[-60, +60]`, a multiple of 15,
/// and not zero. Enforced at the write path, not only in the client.
pub fn validate_adjustment_minutes(minutes: i32) -> Result<(), CoreError> {
    if minutes == 0 {
        return Err(CoreError::Validation(
            "Adjustment must not be zero minutes".into(),
        ));
    }
    if minutes.abs() > MAX_ADJUSTMENT_MINUTES {
        return Err(CoreError::Validation(format!(
            "Adjustment must be within ±{MAX_ADJUSTMENT_MINUTES} minutes, got {minutes}"
        )));
    }
    if minutes % ADJUSTMENT_STEP_MINUTES != 0 {
        return Err(CoreError::Validation(format!(
            "Adjustment must be a multiple of {ADJUSTMENT_STEP_MINUTES} minutes, got {minutes}"
        )));
    }
    Ok(())
}

/// Validate the free-text reason: required and non-empty.
pub fn validate_reason(reason: &str) -> Result<(), CoreError> {
    if reason.trim().is_empty() {
        return Err(CoreError::Validation(
            "A reason is required for a time adjustment".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

/// Shift a time-of-day by a signed number of minutes, wrapping across
/// midnight via date-time arithmetic (`23:30 + 60 → 00:30`).
pub fn adjust_time(base: NaiveTime, minutes: i32) -> NaiveTime {
    // The anchor date is arbitrary; only the time component survives.
    let anchor = NaiveDate::from_ymd_opt(2000, 1, 1)
        .expect("static anchor date is valid")
        .and_time(base);
    (anchor + Duration::minutes(i64::from(minutes))).time()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    // -----------------------------------------------------------------------
    // Arithmetic
    // -----------------------------------------------------------------------

    #[test]
    fn positive_adjustment_shifts_forward() {
        assert_eq!(adjust_time(t(6, 0), 30), t(6, 30));
    }

    #[test]
    fn negative_adjustment_shifts_backward() {
        assert_eq!(adjust_time(t(14, 0), -45), t(13, 15));
    }

    #[test]
    fn midnight_rollover_forward() {
        assert_eq!(adjust_time(t(23, 30), 60), t(0, 30));
    }

    #[test]
    fn midnight_rollover_backward() {
        assert_eq!(adjust_time(t(0, 15), -30), t(23, 45));
    }

    // -----------------------------------------------------------------------
    // Offset bounds
    // -----------------------------------------------------------------------

    #[test]
    fn valid_offsets_pass() {
        for minutes in [-60, -45, -30, -15, 15, 30, 45, 60] {
            assert!(validate_adjustment_minutes(minutes).is_ok());
        }
    }

    #[test]
    fn zero_offset_is_rejected() {
        assert!(validate_adjustment_minutes(0).is_err());
    }

    #[test]
    fn out_of_range_offset_is_rejected() {
        assert!(validate_adjustment_minutes(75).is_err());
        assert!(validate_adjustment_minutes(-90).is_err());
    }

    #[test]
    fn non_step_offset_is_rejected() {
        assert!(validate_adjustment_minutes(20).is_err());
        assert!(validate_adjustment_minutes(-7).is_err());
    }

    // -----------------------------------------------------------------------
    // Reason
    // -----------------------------------------------------------------------

    #[test]
    fn empty_reason_is_rejected() {
        assert!(validate_reason("").is_err());
        assert!(validate_reason("   ").is_err());
    }

    #[test]
    fn non_empty_reason_passes() {
        assert!(validate_reason("Betriebsversammlung").is_ok());
    }
}
