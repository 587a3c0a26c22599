// ============================================================================
// Chat API - Session Handlers
// File: crates/chat-api/src/handlers/sessions.rs
// ============================================================================
//! JSON endpoints over the conversation session lifecycle

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chat_core::{render_transcript, SessionId, SessionSnapshot};
use tracing::info;
use validator::Validate;

use crate::dto::{ExchangeResponse, RoleDto, SelectRoleRequest, SubmitQuestionRequest};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

type SnapshotResponse = Result<Json<ApiResponse<SessionSnapshot>>, ApiError>;

/// Role catalog - GET /api/v1/roles
pub async fn list_roles(State(state): State<AppState>) -> Json<ApiResponse<Vec<RoleDto>>> {
    let catalog = state.chat.roles();
    let roles = catalog
        .presets()
        .iter()
        .enumerate()
        .map(|(i, preset)| RoleDto::from_preset(preset, i == 0))
        .collect();
    Json(ApiResponse::success(roles))
}

/// Open a session - POST /api/v1/sessions
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<SessionSnapshot>>), ApiError> {
    let snapshot = state.chat.open_session().await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(snapshot))))
}

/// GET /api/v1/sessions/{id}
pub async fn get_session(State(state): State<AppState>, Path(id): Path<SessionId>) -> SnapshotResponse {
    let snapshot = state.chat.snapshot(&id).await?;
    Ok(Json(ApiResponse::success(snapshot)))
}

/// DELETE /api/v1/sessions/{id}
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<StatusCode, ApiError> {
    state.chat.close_session(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/sessions/{id}/role
pub async fn select_role(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    Json(payload): Json<SelectRoleRequest>,
) -> SnapshotResponse {
    payload.validate()?;
    let snapshot = state.chat.select_role(&id, &payload.role).await?;
    Ok(Json(ApiResponse::success(snapshot)))
}

/// POST /api/v1/sessions/{id}/messages
pub async fn submit_question(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    Json(payload): Json<SubmitQuestionRequest>,
) -> Result<Json<ApiResponse<ExchangeResponse>>, ApiError> {
    payload.validate()?;
    info!("Question for session {}: {} chars", id, payload.question.chars().count());

    let exchange = state.chat.submit(&id, &payload.question).await?;
    let snapshot = state.chat.snapshot(&id).await?;

    Ok(Json(ApiResponse::success(ExchangeResponse {
        session_id: id,
        role_locked: snapshot.role_locked,
        transcript_len: snapshot.transcript.len(),
        exchange,
    })))
}

/// POST /api/v1/sessions/{id}/new-chat
pub async fn new_chat(State(state): State<AppState>, Path(id): Path<SessionId>) -> SnapshotResponse {
    let snapshot = state.chat.new_chat(&id).await?;
    Ok(Json(ApiResponse::success(snapshot)))
}

/// POST /api/v1/sessions/{id}/debug
pub async fn toggle_debug(State(state): State<AppState>, Path(id): Path<SessionId>) -> SnapshotResponse {
    let snapshot = state.chat.toggle_debug(&id).await?;
    Ok(Json(ApiResponse::success(snapshot)))
}

/// Plain-text transcript - GET /api/v1/sessions/{id}/transcript
pub async fn transcript(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<String, ApiError> {
    let snapshot = state.chat.snapshot(&id).await?;
    Ok(render_transcript(&snapshot.transcript))
}
