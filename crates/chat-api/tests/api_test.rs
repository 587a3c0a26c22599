use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chat_api::{build_router, view::PageRenderer, AppState};
use chat_core::services::{ChatService, ReversalResponder};
use chat_infrastructure::InMemorySessionStore;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    let chat = ChatService::new(
        Arc::new(InMemorySessionStore::default()),
        Arc::new(ReversalResponder),
    );
    let pages = PageRenderer::new().unwrap();
    build_router(AppState::new(Arc::new(chat), Arc::new(pages)))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

async fn post_form(app: &Router, uri: &str, form: &str) -> (StatusCode, Option<String>, String) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, location, String::from_utf8_lossy(&bytes).into_owned())
}

async fn open_session(app: &Router) -> String {
    let (status, body) = send(app, Method::POST, "/api/v1/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["session_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, Method::GET, "/health/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["backend"], "placeholder");
}

#[tokio::test]
async fn test_roles_catalog() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/v1/roles", None).await;

    assert_eq!(status, StatusCode::OK);
    let roles = body["data"].as_array().unwrap();
    assert_eq!(roles.len(), 3);
    assert_eq!(roles[0]["label"], "Assistant");
    assert_eq!(roles[0]["default"], true);
    assert_eq!(roles[2]["label"], "Guide touristique");
}

#[tokio::test]
async fn test_new_session_is_fresh() {
    let app = app();
    let id = open_session(&app).await;
    let (status, body) = send(&app, Method::GET, &format!("/api/v1/sessions/{}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["role_locked"], false);
    assert_eq!(body["data"]["transcript"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_conversation_flow() {
    let app = app();
    let id = open_session(&app).await;

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/sessions/{}/role", id),
        Some(json!({ "role": "Assistant" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/sessions/{}/messages", id),
        Some(json!({ "question": "bonjour le monde" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["exchange"]["answer"], "||ASSISTANT\nruojnob el ednom||");
    assert_eq!(body["data"]["role_locked"], true);
    assert_eq!(body["data"]["transcript_len"], 1);

    let (_, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/sessions/{}/messages", id),
        Some(json!({ "question": "ça va" })),
    )
    .await;
    assert_eq!(body["data"]["exchange"]["answer"], "||aç av||");
    assert_eq!(body["data"]["transcript_len"], 2);

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/sessions/{}/role", id),
        Some(json!({ "role": "Guide touristique" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "CONFLICT");

    let (status, body) = send(&app, Method::GET, &format!("/api/v1/sessions/{}/transcript", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        "== User:\nbonjour le monde\n== Server:\n||ASSISTANT\nruojnob el ednom||\n== User:\nça va\n== Server:\n||aç av||\n"
    );
}

#[tokio::test]
async fn test_blank_question_rejected() {
    let app = app();
    let id = open_session(&app).await;

    for question in ["", "   "] {
        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{}/messages", id),
            Some(json!({ "question": question })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    let (_, body) = send(&app, Method::GET, &format!("/api/v1/sessions/{}", id), None).await;
    assert_eq!(body["data"]["role_locked"], false);
    assert_eq!(body["data"]["transcript"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_new_chat_replaces_session() {
    let app = app();
    let id = open_session(&app).await;
    send(
        &app,
        Method::POST,
        &format!("/api/v1/sessions/{}/messages", id),
        Some(json!({ "question": "salut" })),
    )
    .await;

    let (status, body) = send(&app, Method::POST, &format!("/api/v1/sessions/{}/new-chat", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let new_id = body["data"]["session_id"].as_str().unwrap().to_string();
    assert_ne!(new_id, id);
    assert_eq!(body["data"]["role_locked"], false);

    let (status, _) = send(&app, Method::GET, &format!("/api/v1/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/sessions/{}/messages", new_id),
        Some(json!({ "question": "salut" })),
    )
    .await;
    assert!(body["data"]["exchange"]["answer"]
        .as_str()
        .unwrap()
        .starts_with("||YOU ARE A HELPFUL ASSISTANT."));
}

#[tokio::test]
async fn test_delete_and_unknown_session() {
    let app = app();
    let id = open_session(&app).await;

    let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::DELETE, &format!("/api/v1/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (status, _) = send(&app, Method::GET, "/api/v1/sessions/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_debug_toggle() {
    let app = app();
    let id = open_session(&app).await;

    let (status, body) = send(&app, Method::POST, &format!("/api/v1/sessions/{}/debug", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["debug"]["enabled"], true);
    assert_eq!(body["data"]["debug"]["last_request"], Value::Null);
}

#[tokio::test]
async fn test_page_redirects_to_new_session() {
    let app = app();
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers().get(header::LOCATION).unwrap().to_str().unwrap();
    assert!(location.starts_with("/?session="));
}

#[tokio::test]
async fn test_page_chat_flow() {
    let app = app();
    let id = open_session(&app).await;

    let (status, _, html) = post_form(
        &app,
        "/chat",
        &format!("session_id={}&role=Assistant&question=bonjour+le+monde", id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("YOU ARE A HELPFUL ASSISTANT."));
    assert!(html.contains("ruojnob el ednom||"));
    assert!(html.contains("disabled"));

    // Role is locked now, a posted role is ignored
    let (status, _, html) = post_form(
        &app,
        "/chat",
        &format!("session_id={}&role=Guide+touristique&question=encore", id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("||erocne||"));

    let (_, body) = send(&app, Method::GET, &format!("/api/v1/sessions/{}", id), None).await;
    assert!(body["data"]["role"].as_str().unwrap().starts_with("You are a helpful assistant."));
}

#[tokio::test]
async fn test_page_blank_question_shows_error() {
    let app = app();
    let id = open_session(&app).await;

    let (status, _, html) = post_form(&app, "/chat", &format!("session_id={}&question=+++", id)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(html.contains("Question text is empty"));

    let (_, body) = send(&app, Method::GET, &format!("/api/v1/sessions/{}", id), None).await;
    assert_eq!(body["data"]["role_locked"], false);
}

#[tokio::test]
async fn test_page_blank_question_keeps_role() {
    let app = app();
    let id = open_session(&app).await;

    let (status, _, _) = post_form(
        &app,
        "/chat",
        &format!("session_id={}&role=Guide+touristique&question=+++", id),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, body) = send(&app, Method::GET, &format!("/api/v1/sessions/{}", id), None).await;
    assert!(body["data"]["role"].as_str().unwrap().starts_with("You are a helpful assistant."));
    assert_eq!(body["data"]["role_locked"], false);
}

#[tokio::test]
async fn test_page_keeps_free_text_role() {
    let app = app();
    let id = open_session(&app).await;
    send(
        &app,
        Method::PUT,
        &format!("/api/v1/sessions/{}/role", id),
        Some(json!({ "role": "Talk like a pirate." })),
    )
    .await;

    let request = Request::builder()
        .uri(format!("/?session={}", id))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8_lossy(&bytes);
    assert!(html.contains(r#"<option value="" selected>Custom role</option>"#));

    // The selected custom option posts an empty role
    let (status, _, html) = post_form(&app, "/chat", &format!("session_id={}&role=&question=ahoy", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("TALK LIKE A PIRATE."));

    let (_, body) = send(&app, Method::GET, &format!("/api/v1/sessions/{}", id), None).await;
    assert_eq!(body["data"]["role"], "Talk like a pirate.");
}

#[tokio::test]
async fn test_page_new_chat_and_unknown_session() {
    let app = app();
    let id = open_session(&app).await;

    let (status, location, _) = post_form(&app, "/new-chat", &format!("session_id={}", id)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    let location = location.unwrap();
    assert!(location.starts_with("/?session="));
    assert!(!location.contains(&id));

    let (status, location, _) = post_form(&app, "/chat", "session_id=garbage&question=hi").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/"));
}
