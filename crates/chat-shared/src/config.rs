//! Configuration management

use std::time::Duration;

use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

use crate::constants::*;
use crate::error::ConfigError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub session: SessionSettings,
    pub llm: LlmSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    /// Sessions untouched for longer than this are dropped by the sweeper.
    pub idle_timeout_secs: u64,
    pub sweep_interval_secs: u64,
    pub max_sessions: usize,
}

impl SessionSettings {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            idle_timeout_secs: DEFAULT_IDLE_TIMEOUT_SECS,
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

/// Which backend produces answers.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmBackend {
    /// Local word-reversal transformation, no network.
    #[default]
    Placeholder,
    Gemini,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmSettings {
    pub backend: LlmBackend,
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            backend: LlmBackend::Placeholder,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Defaults, then `config/default`, then `config/{APP_ENV}`, then `CHAT__*` env vars.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::defaults()?
            .set_override("app.env", env.as_str())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Builder pre-populated with every built-in default.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let builder = Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", DEFAULT_HOST)?
            .set_default("app.port", i64::from(DEFAULT_PORT))?
            .set_default("app.name", DEFAULT_APP_NAME)?
            .set_default("session.idle_timeout_secs", DEFAULT_IDLE_TIMEOUT_SECS as i64)?
            .set_default("session.sweep_interval_secs", DEFAULT_SWEEP_INTERVAL_SECS as i64)?
            .set_default("session.max_sessions", DEFAULT_MAX_SESSIONS as i64)?
            .set_default("llm.backend", "placeholder")?
            .set_default("llm.base_url", DEFAULT_GEMINI_BASE_URL)?
            .set_default("llm.model", DEFAULT_GEMINI_MODEL)?
            .set_default("llm.api_key_env", DEFAULT_API_KEY_ENV)?
            .set_default("llm.timeout_secs", DEFAULT_LLM_TIMEOUT_SECS as i64)?;
        Ok(builder)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app.host, self.app.port)
    }
}
