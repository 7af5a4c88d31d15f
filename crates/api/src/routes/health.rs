//! Health check endpoint.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/healthz", get(healthz))
}

/// `GET /healthz` -- liveness plus a database round-trip.
async fn healthz(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    schichtplan_db::health_check(&state.pool)
        .await
        .map_err(AppError::Database)?;
    Ok(Json(json!({ "status": "ok" })))
}
