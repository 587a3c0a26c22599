//! Request and response payloads

use chat_core::{Exchange, RolePreset, SessionId};
use chat_shared::constants::{MAX_QUESTION_CHARS, MAX_ROLE_CHARS};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// PUT /api/v1/sessions/{id}/role
#[derive(Debug, Deserialize, Validate)]
pub struct SelectRoleRequest {
    #[validate(length(max = MAX_ROLE_CHARS, message = "Role text too long"))]
    pub role: String,
}

/// POST /api/v1/sessions/{id}/messages
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitQuestionRequest {
    #[serde(default)]
    #[validate(length(max = MAX_QUESTION_CHARS, message = "Question too long"))]
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct RoleDto {
    pub label: String,
    pub instruction: String,
    pub default: bool,
}

impl RoleDto {
    pub fn from_preset(preset: &RolePreset, default: bool) -> Self {
        Self {
            label: preset.label.to_string(),
            instruction: preset.instruction.to_string(),
            default,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExchangeResponse {
    pub session_id: SessionId,
    pub role_locked: bool,
    pub transcript_len: usize,
    pub exchange: Exchange,
}

/// Form fields posted by the chat page.
#[derive(Debug, Deserialize, Validate)]
pub struct ChatForm {
    pub session_id: String,
    #[serde(default)]
    #[validate(length(max = MAX_QUESTION_CHARS, message = "Question too long"))]
    pub question: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SessionForm {
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub session: Option<String>,
}
