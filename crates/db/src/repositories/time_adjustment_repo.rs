//! Repository for the `shift_time_adjustments` audit table.
//!
//! Rows are insert-only; there are no update or delete operations.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::time_adjustment::{NewTimeAdjustment, ShiftTimeAdjustment};

/// Column list for `shift_time_adjustments` queries.
const COLUMNS: &str = "\
    id, woche_number, change_date, shift_type, adjustment_minutes, \
    original_start, original_end, new_start, new_end, reason, \
    admin_user_id, created_at";

/// Insert and list operations for time-adjustment audit rows.
pub struct TimeAdjustmentRepo;

impl TimeAdjustmentRepo {
    /// Insert one immutable audit row, returning it with id and timestamp.
    pub async fn create(
        pool: &PgPool,
        input: &NewTimeAdjustment,
    ) -> Result<ShiftTimeAdjustment, sqlx::Error> {
        let query = format!(
            "INSERT INTO shift_time_adjustments (\
                woche_number, change_date, shift_type, adjustment_minutes, \
                original_start, original_end, new_start, new_end, \
                reason, admin_user_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ShiftTimeAdjustment>(&query)
            .bind(input.woche_number)
            .bind(input.change_date)
            .bind(&input.shift_type)
            .bind(input.adjustment_minutes)
            .bind(input.original_start)
            .bind(input.original_end)
            .bind(input.new_start)
            .bind(input.new_end)
            .bind(&input.reason)
            .bind(input.admin_user_id)
            .fetch_one(pool)
            .await
    }

    /// List adjustments for a Woche, optionally narrowed to one date.
    pub async fn list_for_woche(
        pool: &PgPool,
        woche_number: i32,
        change_date: Option<NaiveDate>,
    ) -> Result<Vec<ShiftTimeAdjustment>, sqlx::Error> {
        match change_date {
            Some(date) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM shift_time_adjustments \
                     WHERE woche_number = $1 AND change_date = $2 \
                     ORDER BY created_at DESC"
                );
                sqlx::query_as::<_, ShiftTimeAdjustment>(&query)
                    .bind(woche_number)
                    .bind(date)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM shift_time_adjustments \
                     WHERE woche_number = $1 \
                     ORDER BY created_at DESC"
                );
                sqlx::query_as::<_, ShiftTimeAdjustment>(&query)
                    .bind(woche_number)
                    .fetch_all(pool)
                    .await
            }
        }
    }
}
