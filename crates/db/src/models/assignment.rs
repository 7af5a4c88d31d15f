//! Employee assignment entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use schichtplan_core::types::{DbId, Timestamp};

/// A row from the `employee_assignments` table.
///
/// One active row per user (partial unique index on `is_active`).
/// `version` is the optimistic-concurrency token: rotation writes are
/// compare-and-swap on it, so two concurrent rotations of the same employee
/// surface as a conflict instead of a silent last-write-wins.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EmployeeAssignment {
    pub id: DbId,
    pub user_id: DbId,
    pub current_woche: Option<i32>,
    pub last_rotation: Option<Timestamp>,
    pub version: i64,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for a direct admin edit of an assignment's Woche.
#[derive(Debug, Deserialize)]
pub struct UpdateAssignment {
    pub current_woche: Option<i32>,
}
