use axum::routing::get;
use axum::Router;

use crate::handlers::adjustments;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(adjustments::list_adjustments).post(adjustments::apply_adjustments),
    )
}
