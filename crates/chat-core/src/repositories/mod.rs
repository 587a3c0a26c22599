//! Repository traits (ports)

pub mod session_repository;

pub use session_repository::{SessionHandle, SessionRepository};

#[cfg(test)]
pub use session_repository::MockSessionRepository;
