//! Shift time-adjustment audit row model.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use sqlx::FromRow;

use schichtplan_core::types::{DbId, Timestamp};

/// A row from the `shift_time_adjustments` table.
///
/// Immutable after insert: each row records the original and adjusted
/// start/end times so the change is auditable without replaying arithmetic.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ShiftTimeAdjustment {
    pub id: DbId,
    pub woche_number: i32,
    pub change_date: NaiveDate,
    pub shift_type: String,
    pub adjustment_minutes: i32,
    pub original_start: NaiveTime,
    pub original_end: NaiveTime,
    pub new_start: NaiveTime,
    pub new_end: NaiveTime,
    pub reason: String,
    pub admin_user_id: DbId,
    pub created_at: Timestamp,
}

/// Insert payload for a new audit row (id and timestamp are generated).
#[derive(Debug, Clone)]
pub struct NewTimeAdjustment {
    pub woche_number: i32,
    pub change_date: NaiveDate,
    pub shift_type: String,
    pub adjustment_minutes: i32,
    pub original_start: NaiveTime,
    pub original_end: NaiveTime,
    pub new_start: NaiveTime,
    pub new_end: NaiveTime,
    pub reason: String,
    pub admin_user_id: DbId,
}
