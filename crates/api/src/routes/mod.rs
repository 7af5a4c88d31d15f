//! Route table for the API server.
//!
//! ```text
//! /healthz
//! /api/v1
//! ├── /auth
//! │   ├── POST /login
//! │   └── POST /change-password
//! ├── /patterns
//! │   ├── GET  /                      list (?active_only=)
//! │   ├── POST /                      create (admin)
//! │   ├── GET  /{woche}
//! │   ├── PUT  /{woche}               replace (admin)
//! │   └── POST /{woche}/deactivate    retire (admin)
//! ├── /rotation
//! │   ├── GET  /assignments                       (admin)
//! │   ├── POST /assignments                       onboard (admin)
//! │   ├── PUT  /assignments/{user_id}             edit Woche (admin)
//! │   ├── POST /assignments/{user_id}/deactivate  offboard (admin)
//! │   ├── POST /employees/{user_id}/rotate        manual rotation (admin)
//! │   └── POST /sweep                             bulk sweep (admin)
//! ├── /adjustments
//! │   ├── POST /                      apply batch (admin)
//! │   └── GET  /                      list (?woche=&date=)
//! └── /notifications
//!     ├── GET  /                      list (?unread_only=&limit=&offset=)
//!     ├── POST /{id}/read
//!     ├── POST /read-all
//!     └── GET  /unread-count
//! ```

pub mod adjustments;
pub mod auth;
pub mod health;
pub mod notification;
pub mod patterns;
pub mod rotation;

use axum::Router;

use crate::state::AppState;

/// Everything under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::routes())
        .nest("/patterns", patterns::routes())
        .nest("/rotation", rotation::routes())
        .nest("/adjustments", adjustments::routes())
        .nest("/notifications", notification::routes())
}
