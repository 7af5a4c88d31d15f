//! Woche rotation evaluator.
//!
//! Every employee advances through the same fixed cycle of 15 weekly shift
//! patterns, independently of everyone else: the decision for one employee
//! depends only on their own current Woche and the time elapsed since their
//! last rotation. This module lives in `core` (zero internal deps) so it can
//! be used by both the API layer and the standalone sweep worker.

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Lowest valid Woche number.
pub const WOCHE_MIN: i32 = 1;

/// Highest valid Woche number. The cycle wraps back to [`WOCHE_MIN`] after it.
pub const WOCHE_MAX: i32 = 15;

/// Days an employee stays on one Woche before rotation is due.
pub const ROTATION_INTERVAL_DAYS: i64 = 7;

// ---------------------------------------------------------------------------
// Evaluator
// ---------------------------------------------------------------------------

/// The evaluator's verdict for a single employee assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationDecision {
    /// The Woche the employee moves to when rotated.
    pub next_woche: i32,
    /// Whether at least one full week has elapsed since the last rotation.
    pub needs_rotation: bool,
}

/// Check that a Woche number is inside the valid 1..=15 range.
pub fn is_valid_woche(woche: i32) -> bool {
    (WOCHE_MIN..=WOCHE_MAX).contains(&woche)
}

/// Compute the Woche that follows `current` in the fixed forward cycle.
///
/// Total over all inputs: an out-of-range `current` is treated as
/// [`WOCHE_MIN`] before computing, so this never panics or errors.
pub fn next_woche(current: i32) -> i32 {
    let current = if is_valid_woche(current) {
        current
    } else {
        WOCHE_MIN
    };
    if current >= WOCHE_MAX {
        WOCHE_MIN
    } else {
        current + 1
    }
}

/// Whether rotation is due, given the time of the last rotation.
///
/// Elapsed time is floored to whole weeks; rotation is due once at least one
/// full week has passed. An assignment that has never been rotated
/// (`last_rotation = None`) is always due.
pub fn needs_rotation(last_rotation: Option<Timestamp>, now: Timestamp) -> bool {
    match last_rotation {
        Some(last) => (now - last).num_weeks() >= 1,
        None => true,
    }
}

/// Evaluate one assignment: the next Woche and whether rotation is due.
///
/// Pure and total; no side effects.
pub fn evaluate(
    current_woche: i32,
    last_rotation: Option<Timestamp>,
    now: Timestamp,
) -> RotationDecision {
    RotationDecision {
        next_woche: next_woche(current_woche),
        needs_rotation: needs_rotation(last_rotation, now),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    // -----------------------------------------------------------------------
    // Cycle totality
    // -----------------------------------------------------------------------

    #[test]
    fn cycle_advances_by_one_below_max() {
        for w in WOCHE_MIN..WOCHE_MAX {
            assert_eq!(next_woche(w), w + 1);
        }
    }

    #[test]
    fn woche_one_advances_to_two() {
        assert_eq!(next_woche(1), 2);
    }

    #[test]
    fn woche_fourteen_advances_to_fifteen() {
        assert_eq!(next_woche(14), 15);
    }

    #[test]
    fn woche_fifteen_wraps_to_one() {
        assert_eq!(next_woche(15), 1);
    }

    #[test]
    fn cycle_matches_modulo_form() {
        for w in WOCHE_MIN..=WOCHE_MAX {
            assert_eq!(next_woche(w), (w % WOCHE_MAX) + 1);
        }
    }

    // -----------------------------------------------------------------------
    // Out-of-range input is treated as Woche 1
    // -----------------------------------------------------------------------

    #[test]
    fn zero_is_treated_as_woche_one() {
        assert_eq!(next_woche(0), 2);
    }

    #[test]
    fn negative_is_treated_as_woche_one() {
        assert_eq!(next_woche(-3), 2);
    }

    #[test]
    fn above_max_is_treated_as_woche_one() {
        assert_eq!(next_woche(99), 2);
    }

    // -----------------------------------------------------------------------
    // Due-date threshold
    // -----------------------------------------------------------------------

    #[test]
    fn not_due_under_seven_days() {
        let now = Utc::now();
        assert!(!needs_rotation(Some(now - Duration::days(6)), now));
    }

    #[test]
    fn not_due_just_under_seven_days() {
        let now = Utc::now();
        let last = now - Duration::days(7) + Duration::seconds(1);
        assert!(!needs_rotation(Some(last), now));
    }

    #[test]
    fn due_at_exactly_seven_days() {
        let now = Utc::now();
        assert!(needs_rotation(Some(now - Duration::days(7)), now));
    }

    #[test]
    fn due_after_eight_days() {
        let now = Utc::now();
        assert!(needs_rotation(Some(now - Duration::days(8)), now));
    }

    #[test]
    fn never_rotated_is_always_due() {
        assert!(needs_rotation(None, Utc::now()));
    }

    // -----------------------------------------------------------------------
    // evaluate combines both answers
    // -----------------------------------------------------------------------

    #[test]
    fn evaluate_due_assignment_on_last_woche() {
        let now = Utc::now();
        let decision = evaluate(15, Some(now - Duration::days(8)), now);
        assert_eq!(decision.next_woche, 1);
        assert!(decision.needs_rotation);
    }

    #[test]
    fn evaluate_fresh_assignment_is_not_due() {
        let now = Utc::now();
        let decision = evaluate(3, Some(now), now);
        assert_eq!(decision.next_woche, 4);
        assert!(!decision.needs_rotation);
    }

    // -----------------------------------------------------------------------
    // Range check
    // -----------------------------------------------------------------------

    #[test]
    fn valid_woche_range() {
        assert!(is_valid_woche(1));
        assert!(is_valid_woche(15));
        assert!(!is_valid_woche(0));
        assert!(!is_valid_woche(16));
    }
}
