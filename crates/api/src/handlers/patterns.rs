//! Shift pattern CRUD handlers.
//!
//! `weekly_hours` is always derived server-side from the weekday slots on
//! create and update; a client-supplied value is never accepted.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use schichtplan_core::error::CoreError;
use schichtplan_db::models::shift_pattern::{ShiftPattern, UpsertShiftPattern};
use schichtplan_db::repositories::ShiftPatternRepo;

use super::validate_woche;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListPatternsQuery {
    /// When `true`, deactivated patterns are filtered out.
    #[serde(default)]
    pub active_only: bool,
}

/// `GET /patterns` -- list all patterns ordered by Woche number.
pub async fn list_patterns(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<ListPatternsQuery>,
) -> AppResult<Json<DataResponse<Vec<ShiftPattern>>>> {
    let patterns = ShiftPatternRepo::list(&state.pool, query.active_only).await?;
    Ok(Json(DataResponse { data: patterns }))
}

/// `GET /patterns/{woche}` -- fetch one pattern by Woche number.
pub async fn get_pattern(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(woche): Path<i32>,
) -> AppResult<Json<DataResponse<ShiftPattern>>> {
    validate_woche(woche)?;
    let pattern = ShiftPatternRepo::find_by_woche(&state.pool, woche)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ShiftPattern",
            id: i64::from(woche),
        }))?;
    Ok(Json(DataResponse { data: pattern }))
}

#[derive(Debug, Deserialize)]
pub struct CreatePattern {
    pub woche_number: i32,
    #[serde(flatten)]
    pub pattern: UpsertShiftPattern,
}

/// `POST /patterns` -- create a new pattern (admin).
///
/// Duplicate Woche numbers surface as 409 via the unique constraint.
pub async fn create_pattern(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(payload): Json<CreatePattern>,
) -> AppResult<(StatusCode, Json<DataResponse<ShiftPattern>>)> {
    validate_woche(payload.woche_number)?;
    let weekly_hours = payload.pattern.slots()?.weekly_hours();

    let created = ShiftPatternRepo::create(
        &state.pool,
        payload.woche_number,
        &payload.pattern,
        weekly_hours,
    )
    .await?;

    tracing::info!(
        woche = created.woche_number,
        weekly_hours = created.weekly_hours,
        admin_user_id = admin.user_id,
        "Shift pattern created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// `PUT /patterns/{woche}` -- replace a pattern's definition (admin).
pub async fn update_pattern(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(woche): Path<i32>,
    Json(payload): Json<UpsertShiftPattern>,
) -> AppResult<Json<DataResponse<ShiftPattern>>> {
    validate_woche(woche)?;
    let weekly_hours = payload.slots()?.weekly_hours();

    let updated = ShiftPatternRepo::update(&state.pool, woche, &payload, weekly_hours)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ShiftPattern",
            id: i64::from(woche),
        }))?;

    tracing::info!(
        woche,
        weekly_hours = updated.weekly_hours,
        admin_user_id = admin.user_id,
        "Shift pattern updated"
    );

    Ok(Json(DataResponse { data: updated }))
}

/// `POST /patterns/{woche}/deactivate` -- retire a pattern (admin).
///
/// Patterns are never deleted; deactivation keeps historical references
/// (audit rows, past rotations) intact.
pub async fn deactivate_pattern(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(woche): Path<i32>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    validate_woche(woche)?;

    let deactivated = ShiftPatternRepo::deactivate(&state.pool, woche).await?;
    if !deactivated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ShiftPattern",
            id: i64::from(woche),
        }));
    }

    tracing::info!(woche, admin_user_id = admin.user_id, "Shift pattern deactivated");

    Ok(Json(DataResponse {
        data: json!({ "woche_number": woche, "is_active": false }),
    }))
}
