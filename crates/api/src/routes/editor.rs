//! Route definitions for editor sessions, mounted at `/editor/sessions`.

use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::handlers::editor;
use crate::state::AppState;

/// ```text
/// GET    /                                         -> list_sessions
/// POST   /                                         -> create_session
/// GET    /{app_id}                                 -> get_session
/// DELETE /{app_id}                                 -> delete_session
/// PUT    /{app_id}/name                            -> rename_flow
/// POST   /{app_id}/slides                          -> add_slide
/// PUT    /{app_id}/slides/{slide_id}               -> update_slide
/// DELETE /{app_id}/slides/{slide_id}               -> delete_slide
/// POST   /{app_id}/slides/{slide_id}/select        -> select_slide
/// PATCH  /{app_id}/slides/{slide_id}/style         -> patch_slide_style
/// PUT    /{app_id}/global-styles                   -> replace_global_styles
/// PATCH  /{app_id}/global-styles                   -> patch_global_styles
/// GET    /{app_id}/preview                         -> get_preview
/// POST   /{app_id}/preview/interactions            -> record_interaction
/// GET    /{app_id}/responses                       -> get_responses
/// POST   /{app_id}/publish                         -> publish
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(editor::list_sessions).post(editor::create_session),
        )
        .route(
            "/{app_id}",
            get(editor::get_session).delete(editor::delete_session),
        )
        .route("/{app_id}/name", put(editor::rename_flow))
        .route("/{app_id}/slides", post(editor::add_slide))
        .route(
            "/{app_id}/slides/{slide_id}",
            put(editor::update_slide).delete(editor::delete_slide),
        )
        .route(
            "/{app_id}/slides/{slide_id}/select",
            post(editor::select_slide),
        )
        .route(
            "/{app_id}/slides/{slide_id}/style",
            patch(editor::patch_slide_style),
        )
        .route(
            "/{app_id}/global-styles",
            put(editor::replace_global_styles).patch(editor::patch_global_styles),
        )
        .route("/{app_id}/preview", get(editor::get_preview))
        .route(
            "/{app_id}/preview/interactions",
            post(editor::record_interaction),
        )
        .route("/{app_id}/responses", get(editor::get_responses))
        .route("/{app_id}/publish", post(editor::publish))
}
