//! HTML page handlers: the editor at `/`, the standalone viewer, and the
//! 404 fallback.
//!
//! Viewer navigation is server-driven: back and continue controls are links
//! to the same page with `?slide=<n>`, and the completion action on the last
//! slide is handled by the page script. Answers come back the same way, as
//! `?slide=<n>&answer=<value>` from the slide's answer form.

use std::time::Instant;

use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use flowkit_core::animation::ENTER_DELAY;
use flowkit_core::app_id::AppId;
use flowkit_core::bridge::SDK_QUERY_VALUE;
use flowkit_core::navigation::PreviewMode;
use flowkit_core::preview::PreviewSession;
use flowkit_core::render::pages::{editor_page, not_found_page, viewer_page};
use flowkit_core::render::{AnswerForm, NavLinks};
use flowkit_core::response::Interaction;
use flowkit_core::slide::{OnboardingFlow, SlideType};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ViewerQuery {
    /// `ios` when the page is loaded inside the native WebView.
    pub sdk: Option<String>,
    /// Slide index to show; clamped to the flow. Anything that is not a
    /// non-negative integer shows the first slide.
    pub slide: Option<String>,
    /// Answer submitted for the shown slide.
    pub answer: Option<String>,
}

impl ViewerQuery {
    fn mode(&self) -> PreviewMode {
        if self.sdk.as_deref() == Some(SDK_QUERY_VALUE) {
            PreviewMode::Embedded
        } else {
            PreviewMode::Standalone
        }
    }

    fn slide_index(&self) -> usize {
        self.slide
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(0)
    }
}

/// The interaction an answer stands for on a slide of `slide_type`.
fn answer_interaction(slide_type: SlideType, answer: String) -> Option<Interaction> {
    match slide_type {
        SlideType::Choice => Some(Interaction::SelectChoice(answer)),
        SlideType::Input => Some(Interaction::InputChanged(answer)),
        SlideType::Date => Some(Interaction::SelectDate(answer)),
        SlideType::Text | SlideType::Image | SlideType::Video | SlideType::Unknown => None,
    }
}

/// Hidden fields that keep the answer form on slide `index`.
fn answer_form(path: &str, index: usize, mode: PreviewMode) -> AnswerForm {
    let mut fields = Vec::with_capacity(2);
    if mode.is_embedded() {
        fields.push(("sdk".to_string(), SDK_QUERY_VALUE.to_string()));
    }
    fields.push(("slide".to_string(), index.to_string()));
    AnswerForm {
        action: path.to_string(),
        fields,
    }
}

/// `{path}?slide={index}`, keeping the embedded marker.
fn slide_href(path: &str, index: usize, mode: PreviewMode) -> String {
    if mode.is_embedded() {
        format!("{path}?sdk={SDK_QUERY_VALUE}&slide={index}")
    } else {
        format!("{path}?slide={index}")
    }
}

fn not_found_response(path: &str) -> Response {
    tracing::debug!(path, "Serving 404 page");
    (StatusCode::NOT_FOUND, Html(not_found_page(path))).into_response()
}

/// The published flow for `app_id`, falling back to a live editor session
/// so unpublished work can be previewed.
async fn load_flow(state: &AppState, app_id: &AppId) -> AppResult<Option<OnboardingFlow>> {
    if let Some(flow) = state.flows.fetch(app_id).await? {
        return Ok(Some(flow));
    }
    Ok(state
        .sessions
        .read(app_id, |s| s.editor.flow().clone())
        .await)
}

/// GET /
///
/// Renders the default editor session. Loading the page replays the
/// preview's entrance animation.
pub async fn editor(State(state): State<AppState>) -> AppResult<Html<String>> {
    let now = Instant::now();
    let app_id = &state.default_app_id;
    let interactions_url = format!("/api/v1/editor/sessions/{app_id}/preview/interactions");
    let html = state
        .sessions
        .update(app_id, |s| {
            s.sync_preview(now);
            s.preview.replay(now);
            let frame = s.preview.render_for_editor(&s.editor, now + ENTER_DELAY);
            editor_page(&s.editor, app_id, frame.tree, &interactions_url)
        })
        .await
        .ok_or_else(|| AppError::InternalError(format!("Default editor session {app_id} missing")))?;

    Ok(Html(html))
}

/// GET /onboarding/{app_id} and the legacy alias GET /{app_id}
///
/// Unknown or malformed app ids get the 404 page, which adds app-id
/// guidance for single-segment paths.
pub async fn viewer(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    Query(query): Query<ViewerQuery>,
    uri: Uri,
) -> AppResult<Response> {
    let Ok(app_id) = AppId::parse(&raw) else {
        return Ok(not_found_response(uri.path()));
    };
    let Some(flow) = load_flow(&state, &app_id).await? else {
        tracing::info!(app_id = %app_id, "Viewer requested for unknown app id");
        return Ok(not_found_response(uri.path()));
    };

    let mode = query.mode();
    let now = Instant::now();
    let mut preview = PreviewSession::new(mode, now);
    preview.jump_to(&flow, query.slide_index(), now);

    let current = preview.navigator().current();
    if let (Some(index), Some(answer)) = (current, query.answer) {
        let interaction = flow
            .slides
            .get(index)
            .and_then(|slide| answer_interaction(slide.slide_type, answer));
        if let Some(interaction) = interaction {
            match preview.interact(&flow, index, &interaction) {
                Ok(event) => {
                    tracing::debug!(app_id = %app_id, sdk_key = %event.sdk_key, "Viewer answer recorded")
                }
                Err(e) => tracing::debug!(app_id = %app_id, error = %e, "Viewer answer ignored"),
            }
        }
    }

    let navigator = preview.navigator();
    let links = match current {
        Some(index) => NavLinks {
            back: (index > 0).then(|| slide_href(uri.path(), index - 1, mode)),
            next: (!navigator.is_last()).then(|| slide_href(uri.path(), index + 1, mode)),
            answer: Some(answer_form(uri.path(), index, mode)),
        },
        None => NavLinks::default(),
    };

    let frame = preview.render(&flow, now + ENTER_DELAY, links);
    Ok(Html(viewer_page(&flow.name, frame.tree, mode)).into_response())
}

/// Fallback for every unmatched route.
pub async fn not_found(uri: Uri) -> Response {
    not_found_response(uri.path())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_links_keep_sdk_marker() {
        assert_eq!(
            slide_href("/onboarding/a-b", 2, PreviewMode::Embedded),
            "/onboarding/a-b?sdk=ios&slide=2"
        );
        assert_eq!(
            slide_href("/a-b", 0, PreviewMode::Standalone),
            "/a-b?slide=0"
        );
    }

    #[test]
    fn only_ios_marker_embeds() {
        let query = ViewerQuery {
            sdk: Some("android".into()),
            ..ViewerQuery::default()
        };
        assert_eq!(query.mode(), PreviewMode::Standalone);
        let query = ViewerQuery {
            sdk: Some("ios".into()),
            ..ViewerQuery::default()
        };
        assert_eq!(query.mode(), PreviewMode::Embedded);
    }

    #[test]
    fn malformed_slide_index_falls_back_to_first() {
        for raw in ["-1", "abc", "", "1.5"] {
            let query = ViewerQuery {
                slide: Some(raw.into()),
                ..ViewerQuery::default()
            };
            assert_eq!(query.slide_index(), 0, "{raw:?}");
        }
        let query = ViewerQuery {
            slide: Some("2".into()),
            ..ViewerQuery::default()
        };
        assert_eq!(query.slide_index(), 2);
    }

    #[test]
    fn embedded_answer_form_keeps_sdk_marker() {
        let form = answer_form("/onboarding/a-b", 1, PreviewMode::Embedded);
        assert_eq!(form.action, "/onboarding/a-b");
        assert_eq!(
            form.fields,
            vec![
                ("sdk".to_string(), "ios".to_string()),
                ("slide".to_string(), "1".to_string())
            ]
        );
        assert_eq!(answer_form("/a-b", 0, PreviewMode::Standalone).fields.len(), 1);
    }
}
