//! Repository for the `shift_patterns` table.
//!
//! Patterns are read-only from the rotation executor's perspective; writes
//! come from the admin pattern endpoints. `weekly_hours` is always passed in
//! freshly derived from the weekday slots, never taken from stored state.

use sqlx::PgPool;

use schichtplan_core::types::DbId;

use crate::models::shift_pattern::{ShiftPattern, UpsertShiftPattern};

/// Column list for `shift_patterns` queries.
const COLUMNS: &str = "\
    id, woche_number, pattern_name, description, \
    monday, tuesday, wednesday, thursday, friday, saturday, sunday, \
    morning_start, morning_end, afternoon_start, afternoon_end, \
    night_start, night_end, weekly_hours, is_active, created_at, updated_at";

/// Provides CRUD operations for shift patterns.
pub struct ShiftPatternRepo;

impl ShiftPatternRepo {
    /// List all patterns ordered by Woche number.
    ///
    /// When `active_only` is `true`, deactivated patterns are filtered out.
    pub async fn list(pool: &PgPool, active_only: bool) -> Result<Vec<ShiftPattern>, sqlx::Error> {
        let filter = if active_only {
            "WHERE is_active = true"
        } else {
            ""
        };
        let query =
            format!("SELECT {COLUMNS} FROM shift_patterns {filter} ORDER BY woche_number");
        sqlx::query_as::<_, ShiftPattern>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find a pattern by its Woche number.
    pub async fn find_by_woche(
        pool: &PgPool,
        woche_number: i32,
    ) -> Result<Option<ShiftPattern>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shift_patterns WHERE woche_number = $1");
        sqlx::query_as::<_, ShiftPattern>(&query)
            .bind(woche_number)
            .fetch_optional(pool)
            .await
    }

    /// Whether an active pattern exists for the given Woche number.
    ///
    /// Used as the referential-integrity check before assignment writes.
    pub async fn active_woche_exists(
        pool: &PgPool,
        woche_number: i32,
    ) -> Result<bool, sqlx::Error> {
        let exists: Option<i32> = sqlx::query_scalar(
            "SELECT 1 FROM shift_patterns WHERE woche_number = $1 AND is_active = true",
        )
        .bind(woche_number)
        .fetch_optional(pool)
        .await?;
        Ok(exists.is_some())
    }

    /// Create a new pattern. `weekly_hours` must be the freshly derived value.
    pub async fn create(
        pool: &PgPool,
        woche_number: i32,
        input: &UpsertShiftPattern,
        weekly_hours: i32,
    ) -> Result<ShiftPattern, sqlx::Error> {
        let query = format!(
            "INSERT INTO shift_patterns (\
                woche_number, pattern_name, description, \
                monday, tuesday, wednesday, thursday, friday, saturday, sunday, \
                morning_start, morning_end, afternoon_start, afternoon_end, \
                night_start, night_end, weekly_hours) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ShiftPattern>(&query)
            .bind(woche_number)
            .bind(&input.pattern_name)
            .bind(&input.description)
            .bind(&input.monday)
            .bind(&input.tuesday)
            .bind(&input.wednesday)
            .bind(&input.thursday)
            .bind(&input.friday)
            .bind(&input.saturday)
            .bind(&input.sunday)
            .bind(input.morning_start)
            .bind(input.morning_end)
            .bind(input.afternoon_start)
            .bind(input.afternoon_end)
            .bind(input.night_start)
            .bind(input.night_end)
            .bind(weekly_hours)
            .fetch_one(pool)
            .await
    }

    /// Replace an existing pattern's definition.
    pub async fn update(
        pool: &PgPool,
        woche_number: i32,
        input: &UpsertShiftPattern,
        weekly_hours: i32,
    ) -> Result<Option<ShiftPattern>, sqlx::Error> {
        let query = format!(
            "UPDATE shift_patterns SET \
                pattern_name = $2, description = $3, \
                monday = $4, tuesday = $5, wednesday = $6, thursday = $7, \
                friday = $8, saturday = $9, sunday = $10, \
                morning_start = $11, morning_end = $12, \
                afternoon_start = $13, afternoon_end = $14, \
                night_start = $15, night_end = $16, \
                weekly_hours = $17, updated_at = NOW() \
             WHERE woche_number = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ShiftPattern>(&query)
            .bind(woche_number)
            .bind(&input.pattern_name)
            .bind(&input.description)
            .bind(&input.monday)
            .bind(&input.tuesday)
            .bind(&input.wednesday)
            .bind(&input.thursday)
            .bind(&input.friday)
            .bind(&input.saturday)
            .bind(&input.sunday)
            .bind(input.morning_start)
            .bind(input.morning_end)
            .bind(input.afternoon_start)
            .bind(input.afternoon_end)
            .bind(input.night_start)
            .bind(input.night_end)
            .bind(weekly_hours)
            .fetch_optional(pool)
            .await
    }

    /// Deactivate a pattern. Patterns are never deleted.
    ///
    /// Returns `true` if an active pattern was found and deactivated.
    pub async fn deactivate(pool: &PgPool, woche_number: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE shift_patterns \
             SET is_active = false, updated_at = NOW() \
             WHERE woche_number = $1 AND is_active = true",
        )
        .bind(woche_number)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find a pattern's database id by Woche number (for event sourcing).
    pub async fn find_id_by_woche(
        pool: &PgPool,
        woche_number: i32,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM shift_patterns WHERE woche_number = $1")
            .bind(woche_number)
            .fetch_optional(pool)
            .await
    }
}
