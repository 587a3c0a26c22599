//! Gemini chat client (OpenAI-compatible endpoint)

use std::time::Duration;

use async_trait::async_trait;
use chat_core::services::Responder;
use chat_core::{Prompt, Reply, ResponderError, WireTrace};
use chat_shared::{ConfigError, LlmSettings};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

#[derive(Clone)]
pub struct GeminiResponder {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

#[derive(Serialize)]
struct OpenAiChatRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    stream: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OpenAiMessage {
    pub role: String,
    pub content: String,
}

impl OpenAiMessage {
    fn new(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
        }
    }
}

// Response Structures
#[derive(Deserialize)]
struct OpenAiChatResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiChoiceMessage,
}

#[derive(Deserialize)]
struct OpenAiChoiceMessage {
    content: Option<String>,
}

impl GeminiResponder {
    /// Read the API key from the environment variable named in the settings.
    pub fn from_env(settings: &LlmSettings) -> Result<Self, ConfigError> {
        Self::from_lookup(settings, |name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(settings: &LlmSettings, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(&settings.api_key_env)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingCredential(settings.api_key_env.clone()))?;
        Self::with_api_key(settings, api_key)
    }

    pub fn with_api_key(
        settings: &LlmSettings,
        api_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| ConfigError::Invalid(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/chat/completions",
                settings.base_url.trim_end_matches('/')
            ),
            model: settings.model.clone(),
            api_key: api_key.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST a JSON body and return the raw response text.
    pub async fn send_request(&self, body: &serde_json::Value) -> Result<String, ResponderError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| ResponderError::Transport(format!("Gemini Network Error: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ResponderError::Transport(format!("Gemini Read Error: {}", e)))?;

        if !status.is_success() {
            error!("Gemini API Error ({}): {}", status, text);
            return Err(ResponderError::Upstream {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }

    /// System role, past exchanges as user/assistant turns, then the question.
    fn build_messages(prompt: &Prompt) -> Vec<OpenAiMessage> {
        let mut messages = Vec::with_capacity(prompt.history.len() * 2 + 2);
        messages.push(OpenAiMessage::new("system", prompt.role.as_str()));
        for exchange in &prompt.history {
            messages.push(OpenAiMessage::new("user", exchange.question.as_str()));
            messages.push(OpenAiMessage::new("assistant", exchange.answer.as_str()));
        }
        messages.push(OpenAiMessage::new("user", prompt.question.as_str()));
        messages
    }
}

#[async_trait]
impl Responder for GeminiResponder {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn respond(&self, prompt: &Prompt) -> Result<Reply, ResponderError> {
        let request = OpenAiChatRequest {
            model: self.model.clone(),
            messages: Self::build_messages(prompt),
            stream: false,
        };
        let body = serde_json::to_value(&request)
            .map_err(|e| ResponderError::InvalidResponse(format!("Unencodable request: {}", e)))?;

        debug!(
            "Sending {} messages to Gemini ({})",
            request.messages.len(),
            self.model
        );
        let raw_response = self.send_request(&body).await?;

        let parsed: OpenAiChatResponse = serde_json::from_str(&raw_response)
            .map_err(|e| ResponderError::InvalidResponse(format!("Failed to parse Gemini Chat: {}", e)))?;

        let answer = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ResponderError::InvalidResponse("Gemini returned no choices".to_string()))?;

        Ok(Reply {
            answer,
            trace: Some(WireTrace {
                request: serde_json::to_string_pretty(&body).unwrap_or_default(),
                response: raw_response,
            }),
        })
    }
}
