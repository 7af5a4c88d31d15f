use axum::routing::{get, post};
use axum::Router;

use crate::handlers::patterns;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(patterns::list_patterns).post(patterns::create_pattern))
        .route(
            "/{woche}",
            get(patterns::get_pattern).put(patterns::update_pattern),
        )
        .route("/{woche}/deactivate", post(patterns::deactivate_pattern))
}
