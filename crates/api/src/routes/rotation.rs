use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::rotation;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/assignments",
            get(rotation::list_assignments).post(rotation::create_assignment),
        )
        .route("/assignments/{user_id}", put(rotation::update_assignment))
        .route(
            "/assignments/{user_id}/deactivate",
            post(rotation::deactivate_assignment),
        )
        .route("/employees/{user_id}/rotate", post(rotation::rotate_one))
        .route("/sweep", post(rotation::sweep))
}
