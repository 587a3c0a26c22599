//! # Chat Core
//! 
//! Conversation state machine, role catalog, responder port, and the chat service.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::{DomainError, ResponderError, StateError, ValidationError};
