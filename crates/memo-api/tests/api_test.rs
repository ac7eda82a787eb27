//! Endpoint tests driving the router with `tower::ServiceExt::oneshot`.
//!
//! The model is a prompt-capturing mock and the store is in memory, so every
//! test runs without network or database access.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt; // for `.oneshot()`

use memo_api::{create_router, AppState};
use memo_core::{Note, NoteForm, NoteRow};
use memo_db::{MemoryNoteRepository, RepoOp};
use memo_inference::mock::{MockFailure, MockGenerationBackend};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn json_request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    match body {
        Some(val) => builder.body(Body::from(val.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()))
}

async fn post(state: AppState, uri: &str, body: Value) -> (StatusCode, Value) {
    let resp = create_router(state)
        .oneshot(json_request(Method::POST, uri, Some(body)))
        .await
        .unwrap();
    let status = resp.status();
    (status, body_json(resp).await)
}

fn seeded_repo() -> (Arc<MemoryNoteRepository>, Note) {
    let note = Note::from_form(NoteForm::new("Trip", "Seoul palaces"));
    let repo = MemoryNoteRepository::with_rows(vec![NoteRow::from(&note)]);
    (Arc::new(repo), note)
}

// ---------------------------------------------------------------------------
// Tag suggestion
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_generate_tags_trip_example() {
    let mock = MockGenerationBackend::new()
        .with_fixed_response("Sure!\n```json\n[\"#travel\", \"Seoul\", \"\", \"#palace\", \"food\", \"plan\", \"extra\"]\n```");
    let state = AppState::new().with_generator(Arc::new(mock.clone()));

    let (status, body) = post(
        state,
        "/api/generate-tags",
        json!({
            "title": "Trip",
            "content": "Planning a trip to Seoul next month to see palaces and try street food",
            "category": "personal"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let tags: Vec<String> = serde_json::from_value(body["tags"].clone()).unwrap();
    assert!(tags.len() <= 5);
    assert!(tags.iter().all(|t| !t.is_empty() && !t.contains('#')));
    assert_eq!(tags, vec!["travel", "Seoul", "palace", "food", "plan"]);
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_generate_tags_truncates_content_in_prompt() {
    let mock = MockGenerationBackend::new().with_fixed_response(r#"["a"]"#);
    let state = AppState::new().with_generator(Arc::new(mock.clone()));
    let head = "x".repeat(1000);
    let tail = "§".repeat(200);

    let (status, _) = post(
        state,
        "/api/generate-tags",
        json!({ "title": "Long", "content": format!("{}{}", head, tail) }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let prompt = mock.last_prompt().unwrap();
    assert!(prompt.contains(&head));
    assert!(!prompt.contains('§'));
}

#[tokio::test]
async fn test_generate_tags_unparseable_reply_is_empty_list() {
    let mock = MockGenerationBackend::new().with_fixed_response("   ");
    let state = AppState::new().with_generator(Arc::new(mock));

    let (status, body) = post(
        state,
        "/api/generate-tags",
        json!({ "title": "t", "content": "c" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "tags": [] }));
}

#[tokio::test]
async fn test_generate_tags_bracketed_non_json_reply_is_empty_list() {
    let mock = MockGenerationBackend::new().with_fixed_response("Tags: [travel, seoul, food]");
    let state = AppState::new().with_generator(Arc::new(mock));

    let (status, body) = post(
        state,
        "/api/generate-tags",
        json!({ "title": "Trip", "content": "Seoul" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "tags": [] }));
}

#[tokio::test]
async fn test_generate_tags_requires_title_and_content() {
    let mock = MockGenerationBackend::new();
    for body in [
        json!({ "content": "c" }),
        json!({ "title": "t" }),
        json!({ "title": "", "content": "c" }),
        json!({}),
    ] {
        let state = AppState::new().with_generator(Arc::new(mock.clone()));
        let (status, resp) = post(state, "/api/generate-tags", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(resp["error"].is_string());
    }
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_generate_tags_without_generator() {
    let (status, body) = post(
        AppState::new(),
        "/api/generate-tags",
        json!({ "title": "t", "content": "c" }),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("GEMINI_API_KEY"));
}

#[tokio::test]
async fn test_generate_tags_model_failure_is_generic() {
    let mock = MockGenerationBackend::new().with_failure(MockFailure::Inference);
    let state = AppState::new().with_generator(Arc::new(mock));

    let (status, body) = post(
        state,
        "/api/generate-tags",
        json!({ "title": "t", "content": "c" }),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = body["error"].as_str().unwrap();
    assert!(!error.contains("Simulated"));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let state = AppState::new().with_generator(Arc::new(MockGenerationBackend::new()));
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/generate-tags")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let resp = create_router(state).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(resp).await["error"].is_string());
}

// ---------------------------------------------------------------------------
// Summarization
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_summarize_saves_to_store() {
    let (repo, note) = seeded_repo();
    let mock = MockGenerationBackend::new().with_fixed_response("A short summary.");
    let state = AppState::new()
        .with_generator(Arc::new(mock.clone()))
        .with_notes(repo.clone());

    let (status, body) = post(
        state,
        "/api/memos/summarize",
        json!({ "content": "Seoul palaces", "title": "Trip", "memoId": note.id }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "summary": "A short summary.", "saved": true })
    );
    let rows = repo.rows().await;
    assert_eq!(rows[0].ai_summary.as_deref(), Some("A short summary."));

    let prompt = mock.last_prompt().unwrap();
    assert!(prompt.contains("Title: Trip"));
    assert!(prompt.contains("Seoul palaces"));
}

#[tokio::test]
async fn test_summarize_unknown_note_still_returns_summary() {
    let (repo, _) = seeded_repo();
    let mock = MockGenerationBackend::new().with_fixed_response("Summary text");
    let state = AppState::new()
        .with_generator(Arc::new(mock))
        .with_notes(repo);

    let (status, body) = post(
        state,
        "/api/memos/summarize",
        json!({ "content": "c", "memoId": uuid::Uuid::new_v4() }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"], "Summary text");
    assert_eq!(body["saved"], false);
    assert!(body["saveError"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("not found"));
}

#[tokio::test]
async fn test_summarize_without_memo_id() {
    let (repo, _) = seeded_repo();
    let state = AppState::new()
        .with_generator(Arc::new(MockGenerationBackend::new()))
        .with_notes(repo.clone());

    let (status, body) = post(state, "/api/memos/summarize", json!({ "content": "c" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["saved"], false);
    assert!(body["saveError"].as_str().unwrap().contains("memoId"));
    assert!(repo.rows().await[0].ai_summary.is_none());
}

#[tokio::test]
async fn test_summarize_without_store() {
    let state = AppState::new().with_generator(Arc::new(MockGenerationBackend::new()));

    let (status, body) = post(
        state,
        "/api/memos/summarize",
        json!({ "content": "c", "memoId": uuid::Uuid::new_v4() }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["saved"], false);
    assert!(body["saveError"].is_string());
}

#[tokio::test]
async fn test_summarize_store_failure_reported() {
    let (repo, note) = seeded_repo();
    repo.fail_on(RepoOp::UpdateSummary);
    let state = AppState::new()
        .with_generator(Arc::new(MockGenerationBackend::new().with_fixed_response("s")))
        .with_notes(repo);

    let (status, body) = post(
        state,
        "/api/memos/summarize",
        json!({ "content": "c", "memoId": note.id }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"], "s");
    assert_eq!(body["saved"], false);
    assert!(body["saveError"]
        .as_str()
        .unwrap()
        .starts_with("Database save failed"));
}

#[tokio::test]
async fn test_summarize_requires_content() {
    let mock = MockGenerationBackend::new();
    let state = AppState::new().with_generator(Arc::new(mock.clone()));

    let (status, body) = post(state, "/api/memos/summarize", json!({ "title": "t" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Content is required");
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_summarize_without_generator() {
    let (status, body) = post(
        AppState::new(),
        "/api/memos/summarize",
        json!({ "content": "c" }),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("GEMINI_API_KEY"));
}

#[tokio::test]
async fn test_summarize_model_failure() {
    let (repo, note) = seeded_repo();
    let state = AppState::new()
        .with_generator(Arc::new(
            MockGenerationBackend::new().with_failure(MockFailure::Inference),
        ))
        .with_notes(repo.clone());

    let (status, body) = post(
        state,
        "/api/memos/summarize",
        json!({ "content": "c", "memoId": note.id }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to generate summary");
    assert!(body["message"].as_str().unwrap().contains("Simulated failure"));
    assert!(repo.rows().await[0].ai_summary.is_none());
}

// ---------------------------------------------------------------------------
// System routes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_health_reports_configuration() {
    let state = AppState::new().with_generator(Arc::new(MockGenerationBackend::new()));
    let resp = create_router(state)
        .oneshot(json_request(Method::GET, "/health", None))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    let body = body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["generator"], "mock-model");
    assert_eq!(body["store"], false);
}

#[tokio::test]
async fn test_openapi_lists_routes() {
    let resp = create_router(AppState::new())
        .oneshot(json_request(Method::GET, "/openapi.json", None))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert!(body["paths"]["/api/generate-tags"].is_object());
    assert!(body["paths"]["/api/memos/summarize"].is_object());
}
