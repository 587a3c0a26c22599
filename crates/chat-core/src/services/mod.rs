//! Domain services (business logic)

pub mod chat_service;
pub mod responder;

pub use chat_service::ChatService;
pub use responder::{Responder, ReversalResponder};

#[cfg(test)]
pub use responder::MockResponder;
