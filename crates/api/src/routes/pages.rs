//! HTML page routes, mounted at the root.

use axum::routing::get;
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// ```text
/// GET /                       -> editor
/// GET /onboarding/{app_id}    -> viewer
/// GET /{app_id}               -> viewer (legacy alias)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::editor))
        .route("/onboarding/{app_id}", get(pages::viewer))
        .route("/{app_id}", get(pages::viewer))
}
