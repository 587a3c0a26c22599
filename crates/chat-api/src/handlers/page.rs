//! Form-driven chat page
//!
//! Every view carries its session id in a hidden field. Unknown or expired ids
//! send the browser back to `/`, which opens a new session.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use chat_core::{DomainError, SessionId, SessionSnapshot, StateError};
use tracing::{debug, warn};
use validator::Validate;

use crate::dto::{ChatForm, PageQuery, SessionForm};
use crate::error::ApiError;
use crate::state::AppState;
use crate::view::PageView;

fn redirect_to(id: &SessionId) -> Redirect {
    Redirect::to(&format!("/?session={}", id))
}

fn render(state: &AppState, status: StatusCode, view: PageView) -> Result<Response, ApiError> {
    let html = state
        .pages
        .render_index(&view)
        .map_err(|e| ApiError::InternalError(format!("Template rendering failed: {}", e)))?;
    Ok((status, Html(html)).into_response())
}

fn view_of(state: &AppState, snapshot: &SessionSnapshot) -> PageView {
    PageView::build(snapshot, state.chat.roles(), state.chat.responder_name())
}

/// GET /
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Response, ApiError> {
    let id = query.session.as_deref().and_then(|s| s.parse::<SessionId>().ok());

    if let Some(id) = id {
        match state.chat.snapshot(&id).await {
            Ok(snapshot) => return render(&state, StatusCode::OK, view_of(&state, &snapshot)),
            Err(DomainError::SessionNotFound(_)) => debug!("Session {} gone, opening a new one", id),
            Err(e) => return Err(e.into()),
        }
    }

    let snapshot = state.chat.open_session().await?;
    Ok(redirect_to(&snapshot.session_id).into_response())
}

/// POST /chat
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<ChatForm>,
) -> Result<Response, ApiError> {
    let Ok(id) = form.session_id.parse::<SessionId>() else {
        return Ok(Redirect::to("/").into_response());
    };

    if let Err(e) = form.validate() {
        let snapshot = state.chat.snapshot(&id).await?;
        let view = view_of(&state, &snapshot).with_error(&form.question, e.to_string());
        return render(&state, StatusCode::BAD_REQUEST, view);
    }

    // A blank question is rejected below and must leave the role alone
    let role = form
        .role
        .as_deref()
        .filter(|r| !r.is_empty() && !form.question.trim().is_empty());
    if let Some(label) = role {
        let role = state.chat.roles().resolve(label);
        match state.chat.select_role(&id, &role).await {
            Ok(_) => {}
            // A locked role is ignored, the question still goes through
            Err(DomainError::State(StateError::RoleLocked)) => {}
            Err(DomainError::SessionNotFound(_)) => return Ok(Redirect::to("/").into_response()),
            Err(e) => return Err(e.into()),
        }
    }

    let outcome = state.chat.submit(&id, &form.question).await;

    match outcome {
        Ok(_) => {
            let snapshot = state.chat.snapshot(&id).await?;
            render(&state, StatusCode::OK, view_of(&state, &snapshot))
        }
        Err(DomainError::SessionNotFound(_)) => Ok(Redirect::to("/").into_response()),
        // Shown inline, the user stays on the same view
        Err(e @ (DomainError::Validation(_) | DomainError::Responder(_))) => {
            let message = e.to_string();
            let status = ApiError::from(e).status();
            let snapshot = state.chat.snapshot(&id).await?;
            let view = view_of(&state, &snapshot).with_error(&form.question, message);
            render(&state, status, view)
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /new-chat
pub async fn new_chat(
    State(state): State<AppState>,
    Form(form): Form<SessionForm>,
) -> Result<Redirect, ApiError> {
    let snapshot = match form.session_id.parse::<SessionId>() {
        Ok(id) => state.chat.new_chat(&id).await?,
        Err(_) => {
            warn!("New chat posted with malformed session id");
            state.chat.open_session().await?
        }
    };
    Ok(redirect_to(&snapshot.session_id))
}

/// POST /debug
pub async fn toggle_debug(
    State(state): State<AppState>,
    Form(form): Form<SessionForm>,
) -> Result<Redirect, ApiError> {
    let Ok(id) = form.session_id.parse::<SessionId>() else {
        return Ok(Redirect::to("/"));
    };

    match state.chat.toggle_debug(&id).await {
        Ok(snapshot) => Ok(redirect_to(&snapshot.session_id)),
        Err(DomainError::SessionNotFound(_)) => Ok(Redirect::to("/")),
        Err(e) => Err(e.into()),
    }
}
