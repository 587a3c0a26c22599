//! # Chat Shared
//! 
//! Configuration, telemetry, and error types shared by the chat crates.

pub mod constants;
pub mod telemetry;
pub mod config;
pub mod error;

pub use self::config::{AppConfig, LlmBackend, LlmSettings, SessionSettings};
pub use error::ConfigError;
