//! Repository for the `employee_assignments` table.
//!
//! Rotation writes are compare-and-swap on the `version` column: the caller
//! passes the version it read, and zero affected rows means another writer
//! got there first. Assignments are deactivated, never deleted.

use sqlx::PgPool;

use schichtplan_core::types::{DbId, Timestamp};

use crate::models::assignment::EmployeeAssignment;

/// Column list for `employee_assignments` queries.
const COLUMNS: &str = "\
    id, user_id, current_woche, last_rotation, version, is_active, \
    created_at, updated_at";

/// Provides CRUD operations for employee assignments.
pub struct AssignmentRepo;

impl AssignmentRepo {
    /// List all active assignments, ordered by user id.
    ///
    /// The bulk sweep processes assignments in exactly this order.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<EmployeeAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM employee_assignments \
             WHERE is_active = true \
             ORDER BY user_id"
        );
        sqlx::query_as::<_, EmployeeAssignment>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find a user's active assignment.
    pub async fn find_active_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<EmployeeAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM employee_assignments \
             WHERE user_id = $1 AND is_active = true"
        );
        sqlx::query_as::<_, EmployeeAssignment>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List the user ids of all active assignments currently on a Woche.
    ///
    /// Used for the time-adjustment notification fan-out.
    pub async fn list_user_ids_on_woche(
        pool: &PgPool,
        woche_number: i32,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT user_id FROM employee_assignments \
             WHERE current_woche = $1 AND is_active = true \
             ORDER BY user_id",
        )
        .bind(woche_number)
        .fetch_all(pool)
        .await
    }

    /// Apply a rotation: set the new Woche, refresh `last_rotation`, and bump
    /// `version`, guarded by a compare-and-swap on the version read earlier.
    ///
    /// Returns `true` when the write landed, `false` when the version no
    /// longer matched (a concurrent writer rotated this employee first).
    pub async fn apply_rotation(
        pool: &PgPool,
        user_id: DbId,
        new_woche: i32,
        rotated_at: Timestamp,
        expected_version: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE employee_assignments \
             SET current_woche = $3, last_rotation = $4, \
                 version = version + 1, updated_at = NOW() \
             WHERE user_id = $1 AND is_active = true AND version = $2",
        )
        .bind(user_id)
        .bind(expected_version)
        .bind(new_woche)
        .bind(rotated_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Direct admin edit of an assignment's Woche (does not touch
    /// `last_rotation`). Same compare-and-swap guard as rotations.
    pub async fn set_woche(
        pool: &PgPool,
        user_id: DbId,
        woche: Option<i32>,
        expected_version: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE employee_assignments \
             SET current_woche = $3, version = version + 1, updated_at = NOW() \
             WHERE user_id = $1 AND is_active = true AND version = $2",
        )
        .bind(user_id)
        .bind(expected_version)
        .bind(woche)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Onboard a user onto the rotating schedule.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        current_woche: Option<i32>,
    ) -> Result<EmployeeAssignment, sqlx::Error> {
        let query = format!(
            "INSERT INTO employee_assignments (user_id, current_woche) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EmployeeAssignment>(&query)
            .bind(user_id)
            .bind(current_woche)
            .fetch_one(pool)
            .await
    }

    /// Deactivate a user's assignment. Returns `true` if one was active.
    pub async fn deactivate(pool: &PgPool, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE employee_assignments \
             SET is_active = false, updated_at = NOW() \
             WHERE user_id = $1 AND is_active = true",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
