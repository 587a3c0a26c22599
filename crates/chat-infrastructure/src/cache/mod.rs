//! In-memory session storage

mod session_store;
mod sweeper;

pub use session_store::InMemorySessionStore;
pub use sweeper::spawn_sweeper;
