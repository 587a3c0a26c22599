//! Answer backends backed by remote LLM APIs

pub mod gemini;

use std::sync::Arc;

use chat_core::services::{Responder, ReversalResponder};
use chat_shared::{ConfigError, LlmBackend, LlmSettings};
use tracing::info;

pub use gemini::GeminiResponder;

/// Pick the configured backend. Fails when the Gemini key is missing.
pub fn build_responder(settings: &LlmSettings) -> Result<Arc<dyn Responder>, ConfigError> {
    let responder: Arc<dyn Responder> = match settings.backend {
        LlmBackend::Placeholder => Arc::new(ReversalResponder),
        LlmBackend::Gemini => Arc::new(GeminiResponder::from_env(settings)?),
    };
    info!("Answer backend: {}", responder.name());
    Ok(responder)
}
