//! Flexible shift-time adjustment handlers.
//!
//! A batch request is validated in full before anything is written: empty
//! reason, empty list, out-of-range offsets, unknown Woche or shift type all
//! reject the whole batch up front. The apply phase then runs item by item
//! with no cross-item transaction, so a mid-list failure leaves earlier
//! items committed and is reported per item.

use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use schichtplan_core::adjustment::{adjust_time, validate_adjustment_minutes, validate_reason};
use schichtplan_core::error::CoreError;
use schichtplan_core::pattern::ShiftType;
use schichtplan_db::models::shift_pattern::ShiftPattern;
use schichtplan_db::models::time_adjustment::{NewTimeAdjustment, ShiftTimeAdjustment};
use schichtplan_db::repositories::{
    AssignmentRepo, NotificationRepo, ShiftPatternRepo, TimeAdjustmentRepo,
};
use schichtplan_events::{PlatformEvent, EVENT_SHIFT_TIME_CHANGED};

use super::validate_woche;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// `notification_type` for time-adjustment notifications.
const NOTIFICATION_TYPE_TIME_CHANGE: &str = "time_change";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// One queued adjustment within a batch.
#[derive(Debug, Deserialize, Serialize)]
pub struct QueuedAdjustment {
    pub woche_number: i32,
    pub change_date: NaiveDate,
    pub shift_type: String,
    pub adjustment_minutes: i32,
}

/// Batch request body for `POST /adjustments`.
#[derive(Debug, Deserialize, Validate)]
pub struct AdjustmentBatch {
    #[validate(length(min = 1, message = "At least one adjustment is required"))]
    pub adjustments: Vec<QueuedAdjustment>,
    #[validate(length(min = 1, message = "A reason is required"))]
    pub reason: String,
}

/// Per-item apply outcome.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AdjustmentOutcome {
    Applied {
        adjustment: ShiftTimeAdjustment,
        notified_users: usize,
    },
    Failed {
        reason: String,
    },
}

/// One line item of the batch response, in request order.
#[derive(Debug, Serialize)]
pub struct AdjustmentItemResult {
    pub woche_number: i32,
    pub change_date: NaiveDate,
    pub shift_type: String,
    #[serde(flatten)]
    pub outcome: AdjustmentOutcome,
}

/// Full batch response.
#[derive(Debug, Serialize)]
pub struct AdjustmentBatchResult {
    pub applied: usize,
    pub failed: usize,
    pub results: Vec<AdjustmentItemResult>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `POST /adjustments` -- apply a batch of shift-time adjustments (admin).
pub async fn apply_adjustments(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(payload): Json<AdjustmentBatch>,
) -> AppResult<Json<DataResponse<AdjustmentBatchResult>>> {
    payload
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    validate_reason(&payload.reason)?;

    // Validation phase: every item must be fully resolvable before any write.
    let mut resolved: Vec<(ShiftPattern, ShiftType, &QueuedAdjustment)> =
        Vec::with_capacity(payload.adjustments.len());
    for item in &payload.adjustments {
        validate_woche(item.woche_number)?;
        validate_adjustment_minutes(item.adjustment_minutes)?;
        let shift_type = ShiftType::parse(&item.shift_type)?;

        let pattern = ShiftPatternRepo::find_by_woche(&state.pool, item.woche_number)
            .await?
            .filter(|p| p.is_active)
            .ok_or_else(|| {
                AppError::Core(CoreError::Validation(format!(
                    "No active shift pattern for Woche {}",
                    item.woche_number
                )))
            })?;

        resolved.push((pattern, shift_type, item));
    }

    // Apply phase: per item, fault-isolated, in request order.
    let mut results = Vec::with_capacity(resolved.len());
    for (pattern, shift_type, item) in resolved {
        let outcome = match apply_one(&state, &admin, &pattern, shift_type, item, &payload.reason)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(
                    woche = item.woche_number,
                    shift_type = %item.shift_type,
                    error = %e,
                    "Adjustment failed for one item, continuing"
                );
                AdjustmentOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };
        results.push(AdjustmentItemResult {
            woche_number: item.woche_number,
            change_date: item.change_date,
            shift_type: item.shift_type.clone(),
            outcome,
        });
    }

    let applied = results
        .iter()
        .filter(|r| matches!(r.outcome, AdjustmentOutcome::Applied { .. }))
        .count();
    let failed = results.len() - applied;

    tracing::info!(
        applied,
        failed,
        admin_user_id = admin.user_id,
        "Adjustment batch finished"
    );

    Ok(Json(DataResponse {
        data: AdjustmentBatchResult {
            applied,
            failed,
            results,
        },
    }))
}

/// Apply one adjustment: audit row first, then notification fan-out, then
/// the event. The audit write is the commit point.
async fn apply_one(
    state: &AppState,
    admin: &AuthUser,
    pattern: &ShiftPattern,
    shift_type: ShiftType,
    item: &QueuedAdjustment,
    reason: &str,
) -> AppResult<AdjustmentOutcome> {
    let (original_start, original_end) = pattern.window(shift_type);
    let new_start = adjust_time(original_start, item.adjustment_minutes);
    let new_end = adjust_time(original_end, item.adjustment_minutes);

    let audit = TimeAdjustmentRepo::create(
        &state.pool,
        &NewTimeAdjustment {
            woche_number: item.woche_number,
            change_date: item.change_date,
            shift_type: shift_type.as_str().to_string(),
            adjustment_minutes: item.adjustment_minutes,
            original_start,
            original_end,
            new_start,
            new_end,
            reason: reason.to_string(),
            admin_user_id: admin.user_id,
        },
    )
    .await?;

    let affected_users =
        AssignmentRepo::list_user_ids_on_woche(&state.pool, item.woche_number).await?;

    let message = format!(
        "{} shift on {} (Woche {}) now runs {} to {}: {}",
        capitalize(shift_type.as_str()),
        item.change_date,
        item.woche_number,
        new_start.format("%H:%M"),
        new_end.format("%H:%M"),
        reason
    );
    let related = serde_json::json!({
        "type": NOTIFICATION_TYPE_TIME_CHANGE,
        "woche_number": item.woche_number,
        "change_date": item.change_date,
        "shift_type": shift_type.as_str(),
        "adjustment_minutes": item.adjustment_minutes,
        "new_start": new_start,
        "new_end": new_end,
    });
    for user_id in &affected_users {
        NotificationRepo::create(
            &state.pool,
            *user_id,
            "Schichtzeit geändert",
            &message,
            NOTIFICATION_TYPE_TIME_CHANGE,
            &related,
        )
        .await?;
    }

    state.event_bus.publish(
        PlatformEvent::new(EVENT_SHIFT_TIME_CHANGED)
            .with_source("shift_pattern", pattern.id)
            .with_actor(admin.user_id)
            .with_payload(serde_json::json!({
                "woche_number": item.woche_number,
                "change_date": item.change_date,
                "shift_type": shift_type.as_str(),
                "adjustment_minutes": item.adjustment_minutes,
                "notified_users": affected_users.len(),
            })),
    );

    Ok(AdjustmentOutcome::Applied {
        adjustment: audit,
        notified_users: affected_users.len(),
    })
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[derive(Debug, Deserialize)]
pub struct ListAdjustmentsQuery {
    pub woche: i32,
    pub date: Option<NaiveDate>,
}

/// `GET /adjustments?woche=&date=` -- list audit rows for a Woche.
pub async fn list_adjustments(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<ListAdjustmentsQuery>,
) -> AppResult<Json<DataResponse<Vec<ShiftTimeAdjustment>>>> {
    validate_woche(query.woche)?;
    let rows = TimeAdjustmentRepo::list_for_woche(&state.pool, query.woche, query.date).await?;
    Ok(Json(DataResponse { data: rows }))
}
