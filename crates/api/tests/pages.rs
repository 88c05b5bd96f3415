//! Integration tests for the HTML page routes: editor, viewer and 404.

mod common;

use axum::http::StatusCode;
use common::{
    body_text, build_test_app, create_session, get, post_empty, post_json, session_uri,
    DEFAULT_APP_ID,
};
use serde_json::json;

/// Create a session with a choice slide appended and publish it.
async fn published_three_slide_flow(app: &axum::Router) -> String {
    let id = create_session(app, "Travel Setup").await;
    post_json(app, &session_uri(&id, "/slides"), json!({ "type": "choice" })).await;
    post_json(app, &session_uri(&id, "/slides"), json!({ "type": "date" })).await;
    let response = post_empty(app, &session_uri(&id, "/publish")).await;
    assert_eq!(response.status(), StatusCode::OK);
    id
}

#[tokio::test]
async fn editor_page_renders_default_session() {
    let (app, _) = build_test_app().await;
    let response = get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("My Onboarding Flow"));
    assert!(html.contains(DEFAULT_APP_ID));
    assert!(html.contains("Welcome to the App"));
    assert!(html.contains("class=\"phone-frame"));
    assert!(html.contains(&format!(
        "data-interactions-url=\"/api/v1/editor/sessions/{DEFAULT_APP_ID}/preview/interactions\""
    )));
}

#[tokio::test]
async fn viewer_walks_published_flow_with_links() {
    let (app, _) = build_test_app().await;
    let id = published_three_slide_flow(&app).await;

    let html = body_text(get(&app, &format!("/onboarding/{id}")).await).await;
    assert!(html.contains("Welcome to the App"));
    assert!(html.contains(&format!("href=\"/onboarding/{id}?slide=1\"")));
    assert!(html.contains("aria-valuenow=\"33\""));

    let html = body_text(get(&app, &format!("/onboarding/{id}?slide=1")).await).await;
    assert!(html.contains("Make a Selection"));
    assert!(html.contains(&format!("href=\"/onboarding/{id}?slide=0\"")));

    // Last slide outside the SDK finishes with a local notice.
    let html = body_text(get(&app, &format!("/onboarding/{id}?slide=2")).await).await;
    assert!(html.contains("Select a Date"));
    assert!(html.contains("data-action=\"toast\""));
    assert!(html.contains("Onboarding complete"));
}

#[tokio::test]
async fn viewer_answer_marks_choice_selected() {
    let (app, _) = build_test_app().await;
    let id = published_three_slide_flow(&app).await;

    let html = body_text(get(&app, &format!("/onboarding/{id}?slide=1")).await).await;
    assert!(html.contains(&format!("method=\"get\" action=\"/onboarding/{id}\"")));
    assert!(html.contains("type=\"hidden\" name=\"slide\" value=\"1\""));
    assert!(html.contains("type=\"submit\" name=\"answer\" value=\"Option 2\""));
    assert!(!html.contains("Selected:"));

    let response = get(&app, &format!("/onboarding/{id}?slide=1&answer=Option%202")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("data-option=\"Option 2\" aria-pressed=\"true\""));
    assert!(html.contains("data-option=\"Option 1\" aria-pressed=\"false\""));
    assert!(html.contains("Selected: Option 2"));
}

#[tokio::test]
async fn viewer_answer_sets_date_and_ignores_invalid_answers() {
    let (app, _) = build_test_app().await;
    let id = published_three_slide_flow(&app).await;

    let html = body_text(get(&app, &format!("/onboarding/{id}?slide=2&answer=2025-04-16")).await).await;
    assert!(html.contains("April 16, 2025"));
    assert!(html.contains("value=\"2025-04-16\""));

    let response = get(&app, &format!("/onboarding/{id}?slide=1&answer=Nope")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!body_text(response).await.contains("Selected:"));

    // Answers on text slides are ignored.
    let response = get(&app, &format!("/onboarding/{id}?answer=hello")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn embedded_answer_form_keeps_sdk_marker() {
    let (app, _) = build_test_app().await;
    let id = published_three_slide_flow(&app).await;

    let html = body_text(get(&app, &format!("/onboarding/{id}?sdk=ios&slide=1")).await).await;
    assert!(html.contains("type=\"hidden\" name=\"sdk\" value=\"ios\""));
}

#[tokio::test]
async fn malformed_slide_index_shows_first_slide() {
    let (app, _) = build_test_app().await;
    let id = published_three_slide_flow(&app).await;

    for query in ["slide=-1", "slide=abc", "slide="] {
        let response = get(&app, &format!("/onboarding/{id}?{query}")).await;
        assert_eq!(response.status(), StatusCode::OK, "{query}");
        assert!(body_text(response).await.contains("Welcome to the App"));
    }
}

#[tokio::test]
async fn embedded_viewer_posts_completion_and_hides_controls() {
    let (app, _) = build_test_app().await;
    let id = published_three_slide_flow(&app).await;

    let html = body_text(get(&app, &format!("/onboarding/{id}?sdk=ios&slide=7")).await).await;
    assert!(html.contains("data-action=\"complete\""));
    assert!(!html.contains("Replay Animation"));
    assert!(!html.contains("class=\"phone-frame"));
    assert!(html.contains(&format!("href=\"/onboarding/{id}?sdk=ios&amp;slide=1\"")));
    assert!(html.contains("flowKitHandler"));
}

#[tokio::test]
async fn legacy_alias_serves_the_viewer() {
    let (app, _) = build_test_app().await;
    let id = published_three_slide_flow(&app).await;

    let response = get(&app, &format!("/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Welcome to the App"));
}

#[tokio::test]
async fn viewer_previews_unpublished_session() {
    let (app, _) = build_test_app().await;
    let response = get(&app, &format!("/onboarding/{DEFAULT_APP_ID}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_app_id_gets_guidance() {
    let (app, _) = build_test_app().await;
    let response = get(&app, "/my-flow-zzzzzzzz").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let html = body_text(response).await;
    assert!(html.contains("Oops! Page not found"));
    assert!(html.contains("data-guidance=\"app-id\""));
    assert!(html.contains("my-onboarding-flow-y7opwx03"));
}

#[tokio::test]
async fn unmatched_nested_path_gets_plain_404() {
    let (app, _) = build_test_app().await;
    let response = get(&app, "/some/nested/path").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let html = body_text(response).await;
    assert!(html.contains("/some/nested/path"));
    assert!(!html.contains("data-guidance"));
}

#[tokio::test]
async fn malformed_app_id_in_viewer_is_404() {
    let (app, _) = build_test_app().await;
    let response = get(&app, "/onboarding/Not_An_Id").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
