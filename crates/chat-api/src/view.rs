//! Server-rendered chat page

use chat_core::{render_transcript, RoleCatalog, SessionSnapshot};
use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;

const INDEX_TEMPLATE: &str = "index";
const CUSTOM_ROLE_LABEL: &str = "Custom role";

/// One entry of the role select. An empty `value` keeps the current role.
#[derive(Debug, Serialize)]
pub struct RoleOption {
    pub label: String,
    pub value: String,
    pub selected: bool,
}

/// Everything the index template needs.
#[derive(Debug, Serialize)]
pub struct PageView {
    pub session_id: String,
    pub roles: Vec<RoleOption>,
    pub role_locked: bool,
    pub role_text: String,
    pub question: String,
    pub last_answer: String,
    pub transcript: String,
    pub error: Option<String>,
    pub debug_enabled: bool,
    pub last_request: String,
    pub last_response: String,
    pub backend: String,
}

impl PageView {
    pub fn build(snapshot: &SessionSnapshot, catalog: &RoleCatalog, backend: &str) -> Self {
        let selected = catalog.find_by_instruction(&snapshot.role).map(|p| p.label);
        let mut roles: Vec<RoleOption> = catalog
            .presets()
            .iter()
            .map(|p| RoleOption {
                label: p.label.to_string(),
                value: p.label.to_string(),
                selected: Some(p.label) == selected,
            })
            .collect();

        // Free-text role set through the API
        if selected.is_none() {
            roles.push(RoleOption {
                label: CUSTOM_ROLE_LABEL.to_string(),
                value: String::new(),
                selected: true,
            });
        }

        Self {
            session_id: snapshot.session_id.to_string(),
            roles,
            role_locked: snapshot.role_locked,
            role_text: snapshot.role.clone(),
            question: String::new(),
            last_answer: snapshot.last_answer.clone().unwrap_or_default(),
            transcript: render_transcript(&snapshot.transcript),
            error: None,
            debug_enabled: snapshot.debug.enabled,
            last_request: snapshot.debug.last_request.clone().unwrap_or_default(),
            last_response: snapshot.debug.last_response.clone().unwrap_or_default(),
            backend: backend.to_string(),
        }
    }

    /// Keep the rejected input in the form and show the message above it.
    pub fn with_error(mut self, question: &str, message: impl Into<String>) -> Self {
        self.question = question.to_string();
        self.error = Some(message.into());
        self
    }
}

pub struct PageRenderer {
    registry: Handlebars<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_template_string(INDEX_TEMPLATE, include_str!("../templates/index.hbs"))?;
        Ok(Self { registry })
    }

    pub fn render_index(&self, view: &PageView) -> Result<String, RenderError> {
        self.registry.render(INDEX_TEMPLATE, view)
    }
}
