//! Rotation endpoints: assignment lifecycle and edits, manual rotation, and
//! the bulk sweep trigger.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use schichtplan_core::error::CoreError;
use schichtplan_db::models::assignment::{EmployeeAssignment, UpdateAssignment};
use schichtplan_db::repositories::{AssignmentRepo, ShiftPatternRepo, UserRepo};
use schichtplan_worker::{rotate_employee, run_sweep, RotationResult, SweepReport};

use super::validate_woche;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// `GET /rotation/assignments` -- list all active assignments (admin).
pub async fn list_assignments(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<EmployeeAssignment>>>> {
    let assignments = AssignmentRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse { data: assignments }))
}

#[derive(Debug, Deserialize)]
pub struct CreateAssignment {
    pub user_id: i64,
    pub current_woche: Option<i32>,
}

/// `POST /rotation/assignments` -- onboard an employee onto the rotating
/// schedule (admin).
///
/// The starting Woche is optional; an employee onboarded without one enters
/// the cycle at Woche 1 on their first rotation. A second active assignment
/// for the same user surfaces as 409 via the partial unique index.
pub async fn create_assignment(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(payload): Json<CreateAssignment>,
) -> AppResult<(StatusCode, Json<DataResponse<EmployeeAssignment>>)> {
    if let Some(woche) = payload.current_woche {
        validate_woche(woche)?;
        if !ShiftPatternRepo::active_woche_exists(&state.pool, woche).await? {
            return Err(AppError::Core(CoreError::Validation(format!(
                "No active shift pattern for Woche {woche}"
            ))));
        }
    }

    UserRepo::find_by_id(&state.pool, payload.user_id)
        .await?
        .filter(|u| u.is_active)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: payload.user_id,
        }))?;

    let created =
        AssignmentRepo::create(&state.pool, payload.user_id, payload.current_woche).await?;

    tracing::info!(
        user_id = created.user_id,
        current_woche = ?created.current_woche,
        admin_user_id = admin.user_id,
        "Employee onboarded onto rotation"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// `POST /rotation/assignments/{user_id}/deactivate` -- take an employee
/// off the rotating schedule (admin).
///
/// Assignments are never deleted; deactivation keeps rotation history
/// intact and frees the user for a later re-onboarding.
pub async fn deactivate_assignment(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(user_id): Path<i64>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let deactivated = AssignmentRepo::deactivate(&state.pool, user_id).await?;
    if !deactivated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "EmployeeAssignment",
            id: user_id,
        }));
    }

    tracing::info!(user_id, admin_user_id = admin.user_id, "Assignment deactivated");

    Ok(Json(DataResponse {
        data: json!({ "user_id": user_id, "is_active": false }),
    }))
}

/// `PUT /rotation/assignments/{user_id}` -- directly set an employee's
/// current Woche (admin).
///
/// When a Woche is given, it must reference an active pattern; `null`
/// parks the employee outside the cycle. The write is compare-and-swap on
/// the assignment's version.
pub async fn update_assignment(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(user_id): Path<i64>,
    Json(payload): Json<UpdateAssignment>,
) -> AppResult<Json<DataResponse<EmployeeAssignment>>> {
    if let Some(woche) = payload.current_woche {
        validate_woche(woche)?;
        if !ShiftPatternRepo::active_woche_exists(&state.pool, woche).await? {
            return Err(AppError::Core(CoreError::Validation(format!(
                "No active shift pattern for Woche {woche}"
            ))));
        }
    }

    let assignment = AssignmentRepo::find_active_by_user(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "EmployeeAssignment",
            id: user_id,
        }))?;

    let updated = AssignmentRepo::set_woche(
        &state.pool,
        user_id,
        payload.current_woche,
        assignment.version,
    )
    .await?;
    if !updated {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Assignment for user {user_id} was modified concurrently"
        ))));
    }

    tracing::info!(
        user_id,
        new_woche = ?payload.current_woche,
        admin_user_id = admin.user_id,
        "Assignment Woche edited"
    );

    let refreshed = AssignmentRepo::find_active_by_user(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "EmployeeAssignment",
            id: user_id,
        }))?;

    Ok(Json(DataResponse { data: refreshed }))
}

/// `POST /rotation/employees/{user_id}/rotate` -- rotate one employee to
/// their next Woche immediately (admin).
pub async fn rotate_one(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(user_id): Path<i64>,
) -> AppResult<Json<DataResponse<RotationResult>>> {
    let result = rotate_employee(
        &state.pool,
        &state.event_bus,
        user_id,
        Some(admin.user_id),
    )
    .await?;

    tracing::info!(
        user_id,
        old_woche = ?result.old_woche,
        new_woche = result.new_woche,
        admin_user_id = admin.user_id,
        "Manual rotation applied"
    );

    Ok(Json(DataResponse { data: result }))
}

/// `POST /rotation/sweep` -- run the bulk rotation sweep now (admin).
///
/// Returns the full per-employee report. Re-running immediately is a no-op
/// because every `last_rotation` was just refreshed.
pub async fn sweep(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> AppResult<Json<DataResponse<SweepReport>>> {
    let report = run_sweep(&state.pool, &state.event_bus, Some(admin.user_id)).await?;

    tracing::info!(
        total_due = report.total_due,
        rotated = report.rotated,
        failed = report.failed,
        admin_user_id = admin.user_id,
        "Manual sweep finished"
    );

    Ok(Json(DataResponse { data: report }))
}
