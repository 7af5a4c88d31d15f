//! Shift pattern entity model and DTOs.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use schichtplan_core::error::CoreError;
use schichtplan_core::pattern::{ShiftType, WeekdaySlots};
use schichtplan_core::types::{DbId, Timestamp};

/// A row from the `shift_patterns` table.
///
/// `weekly_hours` is derived (8h per assigned weekday slot) and recomputed
/// on every write; it is stored only for cheap reads.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ShiftPattern {
    pub id: DbId,
    pub woche_number: i32,
    pub pattern_name: String,
    pub description: Option<String>,
    pub monday: Option<String>,
    pub tuesday: Option<String>,
    pub wednesday: Option<String>,
    pub thursday: Option<String>,
    pub friday: Option<String>,
    pub saturday: Option<String>,
    pub sunday: Option<String>,
    pub morning_start: NaiveTime,
    pub morning_end: NaiveTime,
    pub afternoon_start: NaiveTime,
    pub afternoon_end: NaiveTime,
    pub night_start: NaiveTime,
    pub night_end: NaiveTime,
    pub weekly_hours: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ShiftPattern {
    /// The base start/end window for one shift type.
    pub fn window(&self, shift_type: ShiftType) -> (NaiveTime, NaiveTime) {
        match shift_type {
            ShiftType::Morning => (self.morning_start, self.morning_end),
            ShiftType::Afternoon => (self.afternoon_start, self.afternoon_end),
            ShiftType::Night => (self.night_start, self.night_end),
        }
    }
}

/// DTO for creating or replacing a shift pattern.
///
/// `weekly_hours` is deliberately absent: the repository derives it from the
/// weekday slots so a stale client value can never drift from the layout.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertShiftPattern {
    pub pattern_name: String,
    pub description: Option<String>,
    pub monday: Option<String>,
    pub tuesday: Option<String>,
    pub wednesday: Option<String>,
    pub thursday: Option<String>,
    pub friday: Option<String>,
    pub saturday: Option<String>,
    pub sunday: Option<String>,
    pub morning_start: NaiveTime,
    pub morning_end: NaiveTime,
    pub afternoon_start: NaiveTime,
    pub afternoon_end: NaiveTime,
    pub night_start: NaiveTime,
    pub night_end: NaiveTime,
}

impl UpsertShiftPattern {
    /// Parse the string weekday slots into typed [`WeekdaySlots`].
    ///
    /// Rejects unknown shift-type strings before anything reaches the
    /// database.
    pub fn slots(&self) -> Result<WeekdaySlots, CoreError> {
        fn parse(slot: &Option<String>) -> Result<Option<ShiftType>, CoreError> {
            slot.as_deref().map(ShiftType::parse).transpose()
        }

        Ok(WeekdaySlots {
            monday: parse(&self.monday)?,
            tuesday: parse(&self.tuesday)?,
            wednesday: parse(&self.wednesday)?,
            thursday: parse(&self.thursday)?,
            friday: parse(&self.friday)?,
            saturday: parse(&self.saturday)?,
            sunday: parse(&self.sunday)?,
        })
    }
}
