//! Application error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Missing credential: environment variable {0} is not set or empty")]
    MissingCredential(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
