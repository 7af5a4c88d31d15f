//! Shift types, weekday slot layout, and weekly-hours derivation.
//!
//! A shift pattern assigns at most one [`ShiftType`] to each weekday and
//! defines a start/end time window per shift type. `weekly_hours` is never
//! stored as an independent source of truth; it is recomputed from the slot
//! layout on every edit.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Hours credited per assigned weekday slot.
pub const HOURS_PER_SLOT: i32 = 8;

/// Number of weekday slots in a pattern (Monday through Sunday).
pub const WEEKDAY_SLOTS: usize = 7;

// ---------------------------------------------------------------------------
// ShiftType
// ---------------------------------------------------------------------------

/// A named time-of-day work window defined per pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftType {
    Morning,
    Afternoon,
    Night,
}

impl ShiftType {
    /// Database string representation (matches the `shift_type` CHECK
    /// constraints in the schema).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Night => "night",
        }
    }

    /// Parse a database string back into a shift type.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "morning" => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            "night" => Ok(Self::Night),
            other => Err(CoreError::Validation(format!(
                "Unknown shift type: {other}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Weekday slots
// ---------------------------------------------------------------------------

/// The per-weekday shift assignment of a pattern. `None` means a free day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekdaySlots {
    pub monday: Option<ShiftType>,
    pub tuesday: Option<ShiftType>,
    pub wednesday: Option<ShiftType>,
    pub thursday: Option<ShiftType>,
    pub friday: Option<ShiftType>,
    pub saturday: Option<ShiftType>,
    pub sunday: Option<ShiftType>,
}

impl WeekdaySlots {
    /// Slots in Monday..Sunday order.
    pub fn as_array(&self) -> [Option<ShiftType>; WEEKDAY_SLOTS] {
        [
            self.monday,
            self.tuesday,
            self.wednesday,
            self.thursday,
            self.friday,
            self.saturday,
            self.sunday,
        ]
    }

    /// Number of weekdays with an assigned shift.
    pub fn assigned_count(&self) -> usize {
        self.as_array().iter().filter(|s| s.is_some()).count()
    }

    /// Derived weekly hours: 8 hours per assigned weekday slot.
    pub fn weekly_hours(&self) -> i32 {
        self.assigned_count() as i32 * HOURS_PER_SLOT
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
