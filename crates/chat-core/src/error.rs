//! Domain errors

use thiserror::Error;

use crate::domain::SessionId;

/// Rejected user input. Recoverable by re-prompting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Question text is empty")]
    EmptyQuestion,
}

/// Transition not allowed in the session's current phase.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("System role can no longer be changed in this conversation")]
    RoleLocked,
}

/// Failure of the backend that produces answers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResponderError {
    #[error("LLM transport error: {0}")]
    Transport(String),

    #[error("LLM API error ({status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("Invalid LLM response: {0}")]
    InvalidResponse(String),
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("Session limit reached ({0} active sessions)")]
    SessionLimitReached(usize),

    #[error(transparent)]
    Responder(#[from] ResponderError),
}
