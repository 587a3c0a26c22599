//! Application-wide constants

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_APP_NAME: &str = "chat-server";
pub const DEFAULT_LOG_FILTER: &str = "info,chat_api=debug,chat_core=debug";

pub const ENV_PREFIX: &str = "CHAT";

pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 30 * 60;
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_KEY";
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;

pub const MAX_QUESTION_CHARS: u64 = 8_000;
pub const MAX_ROLE_CHARS: u64 = 4_000;
