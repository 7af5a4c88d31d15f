//! Notification entity model.

use serde::Serialize;
use sqlx::FromRow;

use schichtplan_core::types::{DbId, Timestamp};

/// A row from the `notifications` table.
///
/// `related` carries structured context for downstream rendering, e.g.
/// `{"type": "rotation", "old_woche": 15, "new_woche": 1}`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub message: String,
    pub notification_type: String,
    pub related: serde_json::Value,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}
