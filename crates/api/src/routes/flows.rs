//! Route definitions for published flows, mounted at `/flows`.

use axum::routing::get;
use axum::Router;

use crate::handlers::flows;
use crate::state::AppState;

/// ```text
/// GET /            -> list_flows
/// GET /{app_id}    -> get_flow
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(flows::list_flows))
        .route("/{app_id}", get(flows::get_flow))
}
