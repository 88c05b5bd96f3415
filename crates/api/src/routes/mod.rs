pub mod editor;
pub mod flows;
pub mod health;
pub mod pages;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /editor/sessions                                     list, create
/// /editor/sessions/{app_id}                            snapshot
/// /editor/sessions/{app_id}/name                       rename flow (PUT)
/// /editor/sessions/{app_id}/slides                     add slide (POST)
/// /editor/sessions/{app_id}/slides/{slide_id}          replace, delete
/// /editor/sessions/{app_id}/slides/{slide_id}/select   select (POST)
/// /editor/sessions/{app_id}/slides/{slide_id}/style    patch overrides (PATCH)
/// /editor/sessions/{app_id}/global-styles              replace (PUT), patch (PATCH)
/// /editor/sessions/{app_id}/preview                    rendered preview (GET)
/// /editor/sessions/{app_id}/preview/interactions       record response (POST)
/// /editor/sessions/{app_id}/responses                  response summary (GET)
/// /editor/sessions/{app_id}/publish                    publish flow (POST)
///
/// /flows                                               published app ids
/// /flows/{app_id}                                      published flow
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/editor/sessions", editor::router())
        .nest("/flows", flows::router())
}
