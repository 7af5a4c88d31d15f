//! Persistence seam for the rotation executor.
//!
//! [`RotationStore`] is the narrow slice of storage the executor needs:
//! reading assignments, checking that the target Woche has an active
//! pattern, the compare-and-swap rotation write, and inserting the
//! notification that follows a successful write. The production
//! implementation is [`DbPool`]; tests substitute an in-memory store to
//! drive the sweep loop through conflict and failure paths without a
//! database.

use std::future::Future;

use schichtplan_core::types::{DbId, Timestamp};
use schichtplan_db::models::assignment::EmployeeAssignment;
use schichtplan_db::repositories::{AssignmentRepo, NotificationRepo, ShiftPatternRepo};
use schichtplan_db::DbPool;

/// Storage operations the rotation executor runs against.
pub trait RotationStore {
    /// All active assignments, in the order the sweep processes them.
    fn list_active_assignments(
        &self,
    ) -> impl Future<Output = Result<Vec<EmployeeAssignment>, sqlx::Error>> + Send;

    /// A single user's active assignment, if any.
    fn find_active_assignment(
        &self,
        user_id: DbId,
    ) -> impl Future<Output = Result<Option<EmployeeAssignment>, sqlx::Error>> + Send;

    /// Whether an active shift pattern exists for the Woche.
    fn active_woche_exists(
        &self,
        woche_number: i32,
    ) -> impl Future<Output = Result<bool, sqlx::Error>> + Send;

    /// Compare-and-swap rotation write. Returns `false` when the expected
    /// version no longer matches.
    fn apply_rotation(
        &self,
        user_id: DbId,
        new_woche: i32,
        rotated_at: Timestamp,
        expected_version: i64,
    ) -> impl Future<Output = Result<bool, sqlx::Error>> + Send;

    /// Insert a notification row, returning its id.
    fn insert_notification(
        &self,
        user_id: DbId,
        title: &str,
        message: &str,
        notification_type: &str,
        related: &serde_json::Value,
    ) -> impl Future<Output = Result<DbId, sqlx::Error>> + Send;
}

impl RotationStore for DbPool {
    async fn list_active_assignments(&self) -> Result<Vec<EmployeeAssignment>, sqlx::Error> {
        AssignmentRepo::list_active(self).await
    }

    async fn find_active_assignment(
        &self,
        user_id: DbId,
    ) -> Result<Option<EmployeeAssignment>, sqlx::Error> {
        AssignmentRepo::find_active_by_user(self, user_id).await
    }

    async fn active_woche_exists(&self, woche_number: i32) -> Result<bool, sqlx::Error> {
        ShiftPatternRepo::active_woche_exists(self, woche_number).await
    }

    async fn apply_rotation(
        &self,
        user_id: DbId,
        new_woche: i32,
        rotated_at: Timestamp,
        expected_version: i64,
    ) -> Result<bool, sqlx::Error> {
        AssignmentRepo::apply_rotation(self, user_id, new_woche, rotated_at, expected_version).await
    }

    async fn insert_notification(
        &self,
        user_id: DbId,
        title: &str,
        message: &str,
        notification_type: &str,
        related: &serde_json::Value,
    ) -> Result<DbId, sqlx::Error> {
        NotificationRepo::create(self, user_id, title, message, notification_type, related).await
    }
}
