use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::handlers::{health, page, sessions};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // JSON API
    let api_routes = Router::new()
        .route("/roles", get(sessions::list_roles))
        .route("/sessions", post(sessions::create_session))
        .route(
            "/sessions/{id}",
            get(sessions::get_session).delete(sessions::delete_session),
        )
        .route("/sessions/{id}/role", put(sessions::select_role))
        .route("/sessions/{id}/messages", post(sessions::submit_question))
        .route("/sessions/{id}/new-chat", post(sessions::new_chat))
        .route("/sessions/{id}/debug", post(sessions::toggle_debug))
        .route("/sessions/{id}/transcript", get(sessions::transcript));

    // Chat page
    let page_routes = Router::new()
        .route("/", get(page::index))
        .route("/chat", post(page::submit))
        .route("/new-chat", post(page::new_chat))
        .route("/debug", post(page::toggle_debug));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .merge(page_routes)
        .nest("/api/v1", api_routes)
        .with_state(state)
        // CORS
        .layer(CorsLayer::permissive())
        // Tracing
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
