//! # Chat Infrastructure
//! 
//! Session store and LLM client implementations (adapters).

pub mod cache;
pub mod llm;

pub use cache::{spawn_sweeper, InMemorySessionStore};
pub use llm::{build_responder, GeminiResponder};
