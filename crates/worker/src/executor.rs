//! Rotation executor.
//!
//! Applies the pure evaluator from `schichtplan_core::rotation` to persisted
//! assignments. Notifications are inserted strictly after a successful
//! assignment write; a failed write never produces a notification.
//!
//! The bulk sweep processes due assignments sequentially in fetch order.
//! The serialization is deliberate: it throttles write load against the
//! database and keeps a simple linear progress signal. Each item is
//! individually fault-isolated, so one employee's failure never aborts the
//! work already decided upon for the rest.

use chrono::Utc;
use serde::Serialize;

use schichtplan_core::rotation::{self, WOCHE_MIN};
use schichtplan_core::types::{DbId, Timestamp};
use schichtplan_db::models::assignment::EmployeeAssignment;
use schichtplan_events::{EventBus, PlatformEvent, EVENT_ROTATION_COMPLETED, EVENT_SWEEP_COMPLETED};

use crate::store::RotationStore;

// ---------------------------------------------------------------------------
// Notification types
// ---------------------------------------------------------------------------

/// `related.type` / `notification_type` for a manually triggered rotation.
const NOTIFICATION_TYPE_ROTATION: &str = "rotation";

/// `related.type` / `notification_type` for a sweep-triggered rotation.
const NOTIFICATION_TYPE_BULK_ROTATION: &str = "bulk_rotation";

// ---------------------------------------------------------------------------
// Errors and results
// ---------------------------------------------------------------------------

/// Failure modes of a single rotation.
#[derive(Debug, thiserror::Error)]
pub enum RotationError {
    /// The user has no active assignment.
    #[error("No active assignment for user {0}")]
    NoAssignment(DbId),

    /// The target Woche has no active shift pattern (referential-integrity
    /// check at write time; dangling references are rejected, not tolerated).
    #[error("No active shift pattern for Woche {0}")]
    MissingPattern(i32),

    /// The assignment's version changed between read and write: a concurrent
    /// writer rotated this employee first.
    #[error("Assignment for user {0} was modified concurrently")]
    Conflict(DbId),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Outcome of a successfully applied rotation.
#[derive(Debug, Clone, Serialize)]
pub struct RotationResult {
    pub user_id: DbId,
    pub old_woche: Option<i32>,
    pub new_woche: i32,
    pub rotated_at: Timestamp,
}

/// Per-employee outcome within a sweep.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RotationOutcome {
    Rotated {
        old_woche: Option<i32>,
        new_woche: i32,
    },
    Failed {
        reason: String,
    },
}

/// One sweep line item: which employee, and what happened.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeRotationResult {
    pub user_id: DbId,
    #[serde(flatten)]
    pub outcome: RotationOutcome,
}

/// Summary of one bulk rotation sweep.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    /// Active assignments that were due for rotation when the sweep started.
    pub total_due: usize,
    pub rotated: usize,
    pub failed: usize,
    pub results: Vec<EmployeeRotationResult>,
}

// ---------------------------------------------------------------------------
// Manual rotation
// ---------------------------------------------------------------------------

/// Rotate a single employee to their next Woche, regardless of whether the
/// weekly interval has elapsed (manual admin trigger).
pub async fn rotate_employee<S: RotationStore>(
    store: &S,
    bus: &EventBus,
    user_id: DbId,
    actor_user_id: Option<DbId>,
) -> Result<RotationResult, RotationError> {
    let assignment = store
        .find_active_assignment(user_id)
        .await?
        .ok_or(RotationError::NoAssignment(user_id))?;

    apply_and_notify(store, bus, &assignment, NOTIFICATION_TYPE_ROTATION, actor_user_id).await
}

// ---------------------------------------------------------------------------
// Bulk sweep
// ---------------------------------------------------------------------------

/// Rotate every active assignment that is due, one at a time.
///
/// Eligibility is evaluated per assignment against its own `last_rotation`,
/// so an immediate re-run after a successful sweep is a no-op: every
/// `last_rotation` was just refreshed.
pub async fn run_sweep<S: RotationStore>(
    store: &S,
    bus: &EventBus,
    actor_user_id: Option<DbId>,
) -> Result<SweepReport, RotationError> {
    let now = Utc::now();
    let due: Vec<EmployeeAssignment> = store
        .list_active_assignments()
        .await?
        .into_iter()
        .filter(|a| rotation::needs_rotation(a.last_rotation, now))
        .collect();

    let total_due = due.len();
    let mut results = Vec::with_capacity(total_due);

    for (index, assignment) in due.iter().enumerate() {
        let outcome = match apply_and_notify(
            store,
            bus,
            assignment,
            NOTIFICATION_TYPE_BULK_ROTATION,
            actor_user_id,
        )
        .await
        {
            Ok(result) => RotationOutcome::Rotated {
                old_woche: result.old_woche,
                new_woche: result.new_woche,
            },
            Err(e) => {
                tracing::warn!(
                    user_id = assignment.user_id,
                    error = %e,
                    "Sweep: rotation failed for one employee, continuing"
                );
                RotationOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        results.push(EmployeeRotationResult {
            user_id: assignment.user_id,
            outcome,
        });

        tracing::info!(
            done = index + 1,
            total = total_due,
            user_id = assignment.user_id,
            "Sweep progress"
        );
    }

    let rotated = results
        .iter()
        .filter(|r| matches!(r.outcome, RotationOutcome::Rotated { .. }))
        .count();
    let failed = total_due - rotated;

    bus.publish(
        PlatformEvent::new(EVENT_SWEEP_COMPLETED).with_payload(serde_json::json!({
            "total_due": total_due,
            "rotated": rotated,
            "failed": failed,
        })),
    );

    Ok(SweepReport {
        total_due,
        rotated,
        failed,
        results,
    })
}

// ---------------------------------------------------------------------------
// Shared apply path
// ---------------------------------------------------------------------------

/// Write one rotation and send its notification.
///
/// Ordering is load-bearing: the compare-and-swap write must succeed before
/// the notification is inserted, and the event is published last.
async fn apply_and_notify<S: RotationStore>(
    store: &S,
    bus: &EventBus,
    assignment: &EmployeeAssignment,
    notification_type: &str,
    actor_user_id: Option<DbId>,
) -> Result<RotationResult, RotationError> {
    let old_woche = assignment.current_woche;

    // An employee not yet in the cycle enters it at Woche 1.
    let new_woche = match old_woche {
        Some(current) => rotation::next_woche(current),
        None => WOCHE_MIN,
    };

    if !store.active_woche_exists(new_woche).await? {
        return Err(RotationError::MissingPattern(new_woche));
    }

    let rotated_at = Utc::now();
    let updated = store
        .apply_rotation(assignment.user_id, new_woche, rotated_at, assignment.version)
        .await?;
    if !updated {
        return Err(RotationError::Conflict(assignment.user_id));
    }

    let message = match old_woche {
        Some(old) => format!("Your shift schedule moved from Woche {old} to Woche {new_woche}"),
        None => format!("You were assigned the Woche {new_woche} shift schedule"),
    };
    let related = serde_json::json!({
        "type": notification_type,
        "old_woche": old_woche,
        "new_woche": new_woche,
    });
    store
        .insert_notification(
            assignment.user_id,
            "Schichtrotation",
            &message,
            notification_type,
            &related,
        )
        .await?;

    let mut event = PlatformEvent::new(EVENT_ROTATION_COMPLETED)
        .with_source("assignment", assignment.id)
        .with_payload(serde_json::json!({
            "user_id": assignment.user_id,
            "old_woche": old_woche,
            "new_woche": new_woche,
        }));
    if let Some(actor) = actor_user_id {
        event = event.with_actor(actor);
    }
    bus.publish(event);

    Ok(RotationResult {
        user_id: assignment.user_id,
        old_woche,
        new_woche,
        rotated_at,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use chrono::Duration;

    use schichtplan_core::rotation::WOCHE_MAX;

    // -----------------------------------------------------------------------
    // In-memory store
    //
    // Drives the executor through conflict and failure paths that are hard
    // to provoke against a live database. `calls` records the order of
    // writes so tests can assert that a notification never precedes its
    // rotation write.
    // -----------------------------------------------------------------------

    #[derive(Debug, Clone)]
    struct StoredNotification {
        user_id: DbId,
        notification_type: String,
        related: serde_json::Value,
    }

    #[derive(Default)]
    struct MemoryStore {
        assignments: Mutex<Vec<EmployeeAssignment>>,
        /// Wochen whose shift pattern is deactivated.
        inactive_wochen: Vec<i32>,
        /// Users whose rotation write loses the compare-and-swap.
        conflict_users: Vec<DbId>,
        notifications: Mutex<Vec<StoredNotification>>,
        calls: Mutex<Vec<String>>,
    }

    impl RotationStore for MemoryStore {
        async fn list_active_assignments(&self) -> Result<Vec<EmployeeAssignment>, sqlx::Error> {
            Ok(self
                .assignments
                .lock()
                .unwrap()
                .iter()
                .filter(|a| a.is_active)
                .cloned()
                .collect())
        }

        async fn find_active_assignment(
            &self,
            user_id: DbId,
        ) -> Result<Option<EmployeeAssignment>, sqlx::Error> {
            Ok(self
                .assignments
                .lock()
                .unwrap()
                .iter()
                .find(|a| a.user_id == user_id && a.is_active)
                .cloned())
        }

        async fn active_woche_exists(&self, woche_number: i32) -> Result<bool, sqlx::Error> {
            Ok(!self.inactive_wochen.contains(&woche_number))
        }

        async fn apply_rotation(
            &self,
            user_id: DbId,
            new_woche: i32,
            rotated_at: Timestamp,
            expected_version: i64,
        ) -> Result<bool, sqlx::Error> {
            self.calls.lock().unwrap().push(format!("apply:{user_id}"));
            if self.conflict_users.contains(&user_id) {
                return Ok(false);
            }
            let mut assignments = self.assignments.lock().unwrap();
            let Some(assignment) = assignments
                .iter_mut()
                .find(|a| a.user_id == user_id && a.is_active && a.version == expected_version)
            else {
                return Ok(false);
            };
            assignment.current_woche = Some(new_woche);
            assignment.last_rotation = Some(rotated_at);
            assignment.version += 1;
            Ok(true)
        }

        async fn insert_notification(
            &self,
            user_id: DbId,
            _title: &str,
            _message: &str,
            notification_type: &str,
            related: &serde_json::Value,
        ) -> Result<DbId, sqlx::Error> {
            self.calls.lock().unwrap().push(format!("notify:{user_id}"));
            let mut notifications = self.notifications.lock().unwrap();
            notifications.push(StoredNotification {
                user_id,
                notification_type: notification_type.to_string(),
                related: related.clone(),
            });
            Ok(notifications.len() as DbId)
        }
    }

    fn assignment(
        user_id: DbId,
        woche: Option<i32>,
        last_rotation: Option<Timestamp>,
    ) -> EmployeeAssignment {
        let now = Utc::now();
        EmployeeAssignment {
            id: user_id + 100,
            user_id,
            current_woche: woche,
            last_rotation,
            version: 1,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn store_with(assignments: Vec<EmployeeAssignment>) -> MemoryStore {
        MemoryStore {
            assignments: Mutex::new(assignments),
            ..Default::default()
        }
    }

    // -----------------------------------------------------------------------
    // Manual rotation
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn manual_rotation_wraps_woche_fifteen_to_one() {
        let store = store_with(vec![assignment(7, Some(WOCHE_MAX), Some(Utc::now()))]);
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        let result = rotate_employee(&store, &bus, 7, Some(1)).await.unwrap();
        assert_eq!(result.old_woche, Some(WOCHE_MAX));
        assert_eq!(result.new_woche, WOCHE_MIN);

        let updated = store.find_active_assignment(7).await.unwrap().unwrap();
        assert_eq!(updated.current_woche, Some(WOCHE_MIN));
        assert_eq!(updated.version, 2);
        assert_eq!(updated.last_rotation, Some(result.rotated_at));

        let notifications = store.notifications.lock().unwrap().clone();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].user_id, 7);
        assert_eq!(notifications[0].notification_type, "rotation");
        assert_eq!(notifications[0].related["old_woche"], WOCHE_MAX);
        assert_eq!(notifications[0].related["new_woche"], WOCHE_MIN);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type, EVENT_ROTATION_COMPLETED);
        assert_eq!(event.source_entity_id, Some(107));
        assert_eq!(event.actor_user_id, Some(1));
        assert_eq!(event.payload["new_woche"], WOCHE_MIN);
    }

    #[tokio::test]
    async fn unassigned_employee_enters_cycle_at_woche_one() {
        let store = store_with(vec![assignment(3, None, None)]);
        let bus = EventBus::default();

        let result = rotate_employee(&store, &bus, 3, None).await.unwrap();
        assert_eq!(result.old_woche, None);
        assert_eq!(result.new_woche, WOCHE_MIN);
    }

    #[tokio::test]
    async fn rotating_a_user_without_assignment_fails() {
        let store = store_with(vec![]);
        let bus = EventBus::default();

        let err = rotate_employee(&store, &bus, 9, None).await.unwrap_err();
        assert!(matches!(err, RotationError::NoAssignment(9)));
    }

    #[tokio::test]
    async fn missing_pattern_blocks_write_and_notification() {
        let mut store = store_with(vec![assignment(5, Some(3), Some(Utc::now()))]);
        store.inactive_wochen = vec![4];
        let bus = EventBus::default();

        let err = rotate_employee(&store, &bus, 5, None).await.unwrap_err();
        assert!(matches!(err, RotationError::MissingPattern(4)));

        // Neither the write nor the notification happened.
        assert!(store.calls.lock().unwrap().is_empty());
        assert!(store.notifications.lock().unwrap().is_empty());
        let untouched = store.find_active_assignment(5).await.unwrap().unwrap();
        assert_eq!(untouched.current_woche, Some(3));
        assert_eq!(untouched.version, 1);
    }

    #[tokio::test]
    async fn concurrent_write_conflict_skips_notification() {
        let mut store = store_with(vec![assignment(7, Some(2), Some(Utc::now()))]);
        store.conflict_users = vec![7];
        let bus = EventBus::default();

        let err = rotate_employee(&store, &bus, 7, None).await.unwrap_err();
        assert!(matches!(err, RotationError::Conflict(7)));

        // The write was attempted; the notification never was.
        assert_eq!(*store.calls.lock().unwrap(), vec!["apply:7".to_string()]);
        assert!(store.notifications.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn notification_follows_successful_write() {
        let store = store_with(vec![assignment(7, Some(2), Some(Utc::now()))]);
        let bus = EventBus::default();

        rotate_employee(&store, &bus, 7, None).await.unwrap();

        let calls = store.calls.lock().unwrap().clone();
        assert_eq!(calls, vec!["apply:7".to_string(), "notify:7".to_string()]);
    }

    // -----------------------------------------------------------------------
    // Bulk sweep
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn sweep_rotates_due_assignments_and_skips_fresh_ones() {
        let now = Utc::now();
        let store = store_with(vec![
            assignment(1, Some(WOCHE_MAX), Some(now - Duration::days(8))),
            assignment(2, None, None),
            assignment(3, Some(5), Some(now)),
        ]);
        let bus = EventBus::default();

        let report = run_sweep(&store, &bus, None).await.unwrap();
        assert_eq!(report.total_due, 2);
        assert_eq!(report.rotated, 2);
        assert_eq!(report.failed, 0);

        let rotated_one = store.find_active_assignment(1).await.unwrap().unwrap();
        assert_eq!(rotated_one.current_woche, Some(WOCHE_MIN));
        let rotated_two = store.find_active_assignment(2).await.unwrap().unwrap();
        assert_eq!(rotated_two.current_woche, Some(WOCHE_MIN));

        // The fresh assignment was never touched.
        let fresh = store.find_active_assignment(3).await.unwrap().unwrap();
        assert_eq!(fresh.current_woche, Some(5));
        assert_eq!(fresh.version, 1);

        let notifications = store.notifications.lock().unwrap().clone();
        assert_eq!(notifications.len(), 2);
        assert!(notifications
            .iter()
            .all(|n| n.notification_type == "bulk_rotation"));
    }

    #[tokio::test]
    async fn sweep_isolates_per_employee_failures() {
        let now = Utc::now();
        let mut store = store_with(vec![
            assignment(1, Some(3), Some(now - Duration::days(8))),
            assignment(2, Some(9), Some(now - Duration::days(8))),
        ]);
        store.inactive_wochen = vec![10];
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        let report = run_sweep(&store, &bus, None).await.unwrap();
        assert_eq!(report.total_due, 2);
        assert_eq!(report.rotated, 1);
        assert_eq!(report.failed, 1);

        assert!(matches!(
            report.results[0].outcome,
            RotationOutcome::Rotated {
                old_woche: Some(3),
                new_woche: 4,
            }
        ));
        match &report.results[1].outcome {
            RotationOutcome::Failed { reason } => assert!(reason.contains("Woche 10")),
            other => panic!("expected failure for user 2, got {other:?}"),
        }

        // Only the successful rotation produced a notification.
        let notifications = store.notifications.lock().unwrap().clone();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].user_id, 1);

        // One rotation event, then the sweep summary with the counts.
        let first = rx.recv().await.unwrap();
        assert_eq!(first.event_type, EVENT_ROTATION_COMPLETED);
        let summary = rx.recv().await.unwrap();
        assert_eq!(summary.event_type, EVENT_SWEEP_COMPLETED);
        assert_eq!(summary.payload["rotated"], 1);
        assert_eq!(summary.payload["failed"], 1);
    }

    #[tokio::test]
    async fn rerunning_a_sweep_immediately_is_a_noop() {
        let now = Utc::now();
        let store = store_with(vec![
            assignment(1, Some(2), Some(now - Duration::days(8))),
            assignment(2, Some(7), None),
        ]);
        let bus = EventBus::default();

        let first = run_sweep(&store, &bus, None).await.unwrap();
        assert_eq!(first.rotated, 2);

        // Every `last_rotation` was just refreshed, so nothing is due.
        let second = run_sweep(&store, &bus, None).await.unwrap();
        assert_eq!(second.total_due, 0);
        assert!(second.results.is_empty());

        let once = store.find_active_assignment(1).await.unwrap().unwrap();
        assert_eq!(once.current_woche, Some(3));
        assert_eq!(once.version, 2);
    }

    // -----------------------------------------------------------------------
    // Report wire shape
    // -----------------------------------------------------------------------

    #[test]
    fn rotated_outcome_serializes_with_status_tag() {
        let result = EmployeeRotationResult {
            user_id: 7,
            outcome: RotationOutcome::Rotated {
                old_woche: Some(15),
                new_woche: 1,
            },
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["user_id"], 7);
        assert_eq!(json["status"], "rotated");
        assert_eq!(json["old_woche"], 15);
        assert_eq!(json["new_woche"], 1);
    }

    #[test]
    fn failed_outcome_carries_reason() {
        let result = EmployeeRotationResult {
            user_id: 9,
            outcome: RotationOutcome::Failed {
                reason: "No active shift pattern for Woche 4".into(),
            },
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["reason"], "No active shift pattern for Woche 4");
    }

    #[test]
    fn sweep_report_counts_serialize() {
        let report = SweepReport {
            total_due: 2,
            rotated: 1,
            failed: 1,
            results: vec![],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["total_due"], 2);
        assert_eq!(json["rotated"], 1);
        assert_eq!(json["failed"], 1);
    }
}
