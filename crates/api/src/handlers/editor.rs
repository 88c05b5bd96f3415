//! Handlers for editor sessions.
//!
//! Every mutation runs under the session lock, then re-syncs the session's
//! preview so the next render reflects it. Slide-level no-ops in the core
//! (unknown slide ids) surface here as 404s; a type change is a validation
//! error.

use std::time::Instant;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use flowkit_core::app_id::AppId;
use flowkit_core::error::CoreError;
use flowkit_core::editor::EditorState;
use flowkit_core::response::{Interaction, ResponseSummary};
use flowkit_core::slide::{OnboardingFlow, Slide, SlideType, DEFAULT_FLOW_NAME};
use flowkit_core::snippets::IntegrationSnippets;
use flowkit_core::style::GlobalStyles;
use flowkit_core::types::SlideId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{parse_app_id, session_not_found};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::sessions::EditorSession;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct CreateSession {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RenameFlow {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AddSlide {
    #[serde(rename = "type")]
    pub slide_type: SlideType,
}

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    pub index: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct InteractionRequest {
    pub index: usize,
    pub interaction: Interaction,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub app_id: AppId,
    pub flow: OnboardingFlow,
    pub selected_slide_id: Option<SlideId>,
}

impl SessionSnapshot {
    fn of(app_id: &AppId, session: &EditorSession) -> Self {
        Self {
            app_id: app_id.clone(),
            flow: session.editor.flow().clone(),
            selected_slide_id: session.editor.selected_slide_id().map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub deleted: bool,
    pub selected_slide_id: Option<SlideId>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishOutcome {
    pub viewer_url: String,
    #[serde(flatten)]
    pub snippets: IntegrationSnippets,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsesReport {
    pub responses: Vec<ResponseSummary>,
    pub sdk_payload: Value,
}

fn slide_not_found(slide_id: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Slide",
        id: slide_id.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

/// GET /api/v1/editor/sessions
pub async fn list_sessions(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse {
        data: state.sessions.ids().await,
    }))
}

/// POST /api/v1/editor/sessions
///
/// The body is optional; `{ "name": "..." }` names the new flow.
pub async fn create_session(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let input: CreateSession = if body.iter().all(u8::is_ascii_whitespace) {
        CreateSession::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::BadRequest(format!("Invalid session body: {e}")))?
    };

    let mut editor = EditorState::default();
    if let Some(name) = input.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        editor.rename_flow(name);
    }
    let app_id = AppId::generate(&editor.flow().name);
    let session = EditorSession::new(editor, Instant::now());
    let snapshot = SessionSnapshot::of(&app_id, &session);

    if let Some(evicted) = state.sessions.insert(app_id.clone(), session).await {
        tracing::warn!(app_id = %evicted, "Session limit reached, evicted least recently used");
    }
    tracing::info!(app_id = %app_id, name = %snapshot.flow.name, "Editor session created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: snapshot })))
}

/// DELETE /api/v1/editor/sessions/{app_id}
///
/// Published flows stay available. The default session cannot be deleted.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let app_id = parse_app_id(&app_id)?;
    if app_id == state.default_app_id {
        return Err(AppError::BadRequest(
            "The default editor session cannot be deleted".into(),
        ));
    }
    state
        .sessions
        .remove(&app_id)
        .await
        .ok_or_else(|| session_not_found(&app_id))?;

    tracing::info!(app_id = %app_id, "Editor session deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/editor/sessions/{app_id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let app_id = parse_app_id(&app_id)?;
    let snapshot = state
        .sessions
        .read(&app_id, |s| SessionSnapshot::of(&app_id, s))
        .await
        .ok_or_else(|| session_not_found(&app_id))?;

    Ok(Json(DataResponse { data: snapshot }))
}

/// PUT /api/v1/editor/sessions/{app_id}/name
pub async fn rename_flow(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
    Json(input): Json<RenameFlow>,
) -> AppResult<impl IntoResponse> {
    let app_id = parse_app_id(&app_id)?;
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Flow name must not be empty".into(),
        )));
    }

    let snapshot = state
        .sessions
        .update(&app_id, |s| {
            s.editor.rename_flow(name);
            SessionSnapshot::of(&app_id, s)
        })
        .await
        .ok_or_else(|| session_not_found(&app_id))?;

    tracing::info!(app_id = %app_id, name, "Flow renamed");
    Ok(Json(DataResponse { data: snapshot }))
}

// ---------------------------------------------------------------------------
// Slides
// ---------------------------------------------------------------------------

/// POST /api/v1/editor/sessions/{app_id}/slides
pub async fn add_slide(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
    Json(input): Json<AddSlide>,
) -> AppResult<impl IntoResponse> {
    let app_id = parse_app_id(&app_id)?;
    if !input.slide_type.is_known() {
        return Err(AppError::Core(CoreError::Validation(
            "Slide type must be one of text, image, video, choice, input, date".into(),
        )));
    }

    let now = Instant::now();
    let slide = state
        .sessions
        .update(&app_id, |s| {
            let slide = s.editor.add_slide(input.slide_type).clone();
            s.sync_preview(now);
            slide
        })
        .await
        .ok_or_else(|| session_not_found(&app_id))?;

    tracing::info!(app_id = %app_id, slide_id = %slide.id, slide_type = slide.slide_type.as_str(), "Slide added");
    Ok((StatusCode::CREATED, Json(DataResponse { data: slide })))
}

/// PUT /api/v1/editor/sessions/{app_id}/slides/{slide_id}
///
/// Replaces the slide wholesale. The body's `id` must match the path and
/// its `type` must match the stored slide.
pub async fn update_slide(
    State(state): State<AppState>,
    Path((app_id, slide_id)): Path<(String, String)>,
    Json(slide): Json<Slide>,
) -> AppResult<impl IntoResponse> {
    let app_id = parse_app_id(&app_id)?;
    if slide.id != slide_id {
        return Err(AppError::BadRequest(format!(
            "Slide id '{}' does not match path id '{slide_id}'",
            slide.id
        )));
    }

    let now = Instant::now();
    let updated = state
        .sessions
        .update(&app_id, |s| -> AppResult<Slide> {
            let existing = s
                .editor
                .slide(&slide_id)
                .ok_or_else(|| slide_not_found(&slide_id))?;
            if existing.slide_type != slide.slide_type {
                return Err(AppError::Core(CoreError::Validation(format!(
                    "Slide type cannot change from {} to {}",
                    existing.slide_type.as_str(),
                    slide.slide_type.as_str()
                ))));
            }
            s.editor.update_slide(slide.clone());
            s.sync_preview(now);
            Ok(slide)
        })
        .await
        .ok_or_else(|| session_not_found(&app_id))??;

    tracing::debug!(app_id = %app_id, slide_id = %slide_id, "Slide updated");
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/editor/sessions/{app_id}/slides/{slide_id}
///
/// Deleting an unknown slide is not an error; `deleted` reports whether
/// anything was removed.
pub async fn delete_slide(
    State(state): State<AppState>,
    Path((app_id, slide_id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let app_id = parse_app_id(&app_id)?;
    let now = Instant::now();
    let outcome = state
        .sessions
        .update(&app_id, |s| {
            let deleted = s.editor.delete_slide(&slide_id);
            s.sync_preview(now);
            DeleteOutcome {
                deleted,
                selected_slide_id: s.editor.selected_slide_id().map(str::to_string),
            }
        })
        .await
        .ok_or_else(|| session_not_found(&app_id))?;

    tracing::info!(app_id = %app_id, slide_id = %slide_id, deleted = outcome.deleted, "Slide delete requested");
    Ok(Json(DataResponse { data: outcome }))
}

/// POST /api/v1/editor/sessions/{app_id}/slides/{slide_id}/select
pub async fn select_slide(
    State(state): State<AppState>,
    Path((app_id, slide_id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let app_id = parse_app_id(&app_id)?;
    let now = Instant::now();
    let snapshot = state
        .sessions
        .update(&app_id, |s| -> AppResult<SessionSnapshot> {
            if !s.editor.select_slide(&slide_id) {
                return Err(slide_not_found(&slide_id));
            }
            s.sync_preview(now);
            Ok(SessionSnapshot::of(&app_id, s))
        })
        .await
        .ok_or_else(|| session_not_found(&app_id))??;

    Ok(Json(DataResponse { data: snapshot }))
}

/// PATCH /api/v1/editor/sessions/{app_id}/slides/{slide_id}/style
///
/// Body is `{ fieldName: value, ... }`; `null` clears an override. The patch
/// applies entirely or not at all.
pub async fn patch_slide_style(
    State(state): State<AppState>,
    Path((app_id, slide_id)): Path<(String, String)>,
    Json(patch): Json<Map<String, Value>>,
) -> AppResult<impl IntoResponse> {
    let app_id = parse_app_id(&app_id)?;
    let now = Instant::now();
    let slide = state
        .sessions
        .update(&app_id, |s| -> AppResult<Slide> {
            let mut slide = s
                .editor
                .slide(&slide_id)
                .cloned()
                .ok_or_else(|| slide_not_found(&slide_id))?;
            slide.style.apply_patch_map(&patch)?;
            s.editor.update_slide(slide.clone());
            s.sync_preview(now);
            Ok(slide)
        })
        .await
        .ok_or_else(|| session_not_found(&app_id))??;

    tracing::debug!(app_id = %app_id, slide_id = %slide_id, fields = patch.len(), "Slide style patched");
    Ok(Json(DataResponse { data: slide }))
}

// ---------------------------------------------------------------------------
// Global styles
// ---------------------------------------------------------------------------

/// PUT /api/v1/editor/sessions/{app_id}/global-styles
pub async fn replace_global_styles(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
    Json(styles): Json<GlobalStyles>,
) -> AppResult<impl IntoResponse> {
    let app_id = parse_app_id(&app_id)?;
    let now = Instant::now();
    let styles = state
        .sessions
        .update(&app_id, |s| {
            s.editor.update_global_styles(styles);
            s.sync_preview(now);
            s.editor.flow().global_styles.clone()
        })
        .await
        .ok_or_else(|| session_not_found(&app_id))?;

    tracing::info!(app_id = %app_id, "Global styles replaced");
    Ok(Json(DataResponse { data: styles }))
}

/// PATCH /api/v1/editor/sessions/{app_id}/global-styles
pub async fn patch_global_styles(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
    Json(patch): Json<Map<String, Value>>,
) -> AppResult<impl IntoResponse> {
    let app_id = parse_app_id(&app_id)?;
    let now = Instant::now();
    let styles = state
        .sessions
        .update(&app_id, |s| -> AppResult<GlobalStyles> {
            let mut next = s.editor.flow().global_styles.clone();
            next.styles.apply_patch_map(&patch)?;
            s.editor.update_global_styles(next.clone());
            s.sync_preview(now);
            Ok(next)
        })
        .await
        .ok_or_else(|| session_not_found(&app_id))??;

    tracing::debug!(app_id = %app_id, fields = patch.len(), "Global styles patched");
    Ok(Json(DataResponse { data: styles }))
}

// ---------------------------------------------------------------------------
// Preview
// ---------------------------------------------------------------------------

/// GET /api/v1/editor/sessions/{app_id}/preview?index=
///
/// Without `index` the preview shows the editor's selected slide; with it,
/// the preview jumps to that (clamped) index.
pub async fn get_preview(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
    Query(query): Query<PreviewQuery>,
) -> AppResult<impl IntoResponse> {
    let app_id = parse_app_id(&app_id)?;
    let now = Instant::now();
    let frame = state
        .sessions
        .update(&app_id, |s| match query.index {
            Some(index) => {
                s.preview.jump_to(s.editor.flow(), index, now);
                s.preview.render(s.editor.flow(), now, Default::default())
            }
            None => {
                s.sync_preview(now);
                s.preview.render_for_editor(&s.editor, now)
            }
        })
        .await
        .ok_or_else(|| session_not_found(&app_id))?;

    Ok(Json(DataResponse { data: frame }))
}

/// POST /api/v1/editor/sessions/{app_id}/preview/interactions
pub async fn record_interaction(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
    Json(input): Json<InteractionRequest>,
) -> AppResult<impl IntoResponse> {
    let app_id = parse_app_id(&app_id)?;
    let event = state
        .sessions
        .update(&app_id, |s| {
            s.preview
                .interact(s.editor.flow(), input.index, &input.interaction)
        })
        .await
        .ok_or_else(|| session_not_found(&app_id))??;

    tracing::info!(
        app_id = %app_id,
        slide_id = %event.slide_id,
        sdk_key = %event.sdk_key,
        "Preview response recorded",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// GET /api/v1/editor/sessions/{app_id}/responses
pub async fn get_responses(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let app_id = parse_app_id(&app_id)?;
    let report = state
        .sessions
        .read(&app_id, |s| ResponsesReport {
            responses: s.preview.responses().summary(s.editor.slides()),
            sdk_payload: s.preview.responses().sdk_payload(),
        })
        .await
        .ok_or_else(|| session_not_found(&app_id))?;

    Ok(Json(DataResponse { data: report }))
}

// ---------------------------------------------------------------------------
// Publishing
// ---------------------------------------------------------------------------

/// POST /api/v1/editor/sessions/{app_id}/publish
///
/// Stores a snapshot of the flow for the viewer and the native SDK and
/// returns the integration snippets for it.
pub async fn publish(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let app_id = parse_app_id(&app_id)?;
    let flow = state
        .sessions
        .read(&app_id, |s| s.editor.flow().clone())
        .await
        .ok_or_else(|| session_not_found(&app_id))?;

    let flow_name = if flow.name.trim().is_empty() {
        DEFAULT_FLOW_NAME.to_string()
    } else {
        flow.name.clone()
    };
    state.flows.publish(&app_id, flow).await?;

    let outcome = PublishOutcome {
        viewer_url: state.config.viewer_url(app_id.as_str()),
        snippets: IntegrationSnippets::new(&app_id, &flow_name),
    };
    Ok(Json(DataResponse { data: outcome }))
}
