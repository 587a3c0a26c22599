//! # Chat Core - Domain Module
//! 
//! Conversation entities and the placeholder answer transformation.

pub mod exchange;
pub mod role;
pub mod session;
pub mod transform;

// Re-export all entities
pub use exchange::{render_transcript, Exchange};
pub use role::{RoleCatalog, RolePreset};
pub use session::{ConversationSession, DebugTrace, Prompt, Reply, SessionId, SessionSnapshot, WireTrace};
