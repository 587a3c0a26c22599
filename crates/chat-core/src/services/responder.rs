//! Answer backends

use async_trait::async_trait;

use crate::domain::{transform, Prompt, Reply};
use crate::error::ResponderError;

/// Turns a validated prompt into an answer. The session state machine does not
/// care which backend is plugged in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Responder: Send + Sync {
    fn name(&self) -> &'static str;

    async fn respond(&self, prompt: &Prompt) -> Result<Reply, ResponderError>;
}

/// Local placeholder: reverses every word, role banner on the first answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReversalResponder;

#[async_trait]
impl Responder for ReversalResponder {
    fn name(&self) -> &'static str {
        "placeholder"
    }

    async fn respond(&self, prompt: &Prompt) -> Result<Reply, ResponderError> {
        Ok(Reply::text(transform::placeholder_answer(
            &prompt.question,
            prompt.banner_role(),
        )))
    }
}
