//! Notification handlers. Users only ever see their own notifications; the
//! user id comes from the JWT, never from the request.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use schichtplan_core::error::CoreError;
use schichtplan_db::models::notification::Notification;
use schichtplan_db::repositories::NotificationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default page size for notification listings.
const DEFAULT_LIMIT: i64 = 50;

/// Hard cap on a single page.
const MAX_LIMIT: i64 = 200;

#[derive(Debug, Deserialize)]
pub struct ListNotificationsQuery {
    #[serde(default)]
    pub unread_only: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `GET /notifications` -- list the caller's notifications, newest first.
pub async fn list_notifications(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListNotificationsQuery>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = query.offset.unwrap_or(0).max(0);

    let notifications = NotificationRepo::list_for_user(
        &state.pool,
        user.user_id,
        query.unread_only,
        limit,
        offset,
    )
    .await?;
    Ok(Json(DataResponse {
        data: notifications,
    }))
}

/// `POST /notifications/{id}/read` -- mark one of the caller's notifications
/// as read.
pub async fn mark_read(
    State(state): State<AppState>,
    user: AuthUser,
    Path(notification_id): Path<i64>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let marked = NotificationRepo::mark_read(&state.pool, notification_id, user.user_id).await?;
    if !marked {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id: notification_id,
        }));
    }
    Ok(Json(DataResponse {
        data: json!({ "id": notification_id, "is_read": true }),
    }))
}

/// `POST /notifications/read-all` -- mark all of the caller's unread
/// notifications as read.
pub async fn mark_all_read(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let count = NotificationRepo::mark_all_read(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse {
        data: json!({ "marked_read": count }),
    }))
}

/// `GET /notifications/unread-count` -- number of unread notifications.
pub async fn unread_count(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let count = NotificationRepo::unread_count(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse {
        data: json!({ "count": count }),
    }))
}
