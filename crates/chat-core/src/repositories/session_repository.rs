//! Session repository trait (port)

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConversationSession, SessionId};
use crate::error::DomainError;

/// Shared handle to one session. Holding the lock serializes its requests.
pub type SessionHandle = Arc<Mutex<ConversationSession>>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Store a new session under its own id.
    async fn insert(&self, session: ConversationSession) -> Result<SessionHandle, DomainError>;

    /// Look up a live session, refreshing its idle timer.
    async fn find(&self, id: &SessionId) -> Option<SessionHandle>;

    async fn remove(&self, id: &SessionId) -> Option<SessionHandle>;

    /// Drop idle sessions. Returns how many were removed.
    async fn purge_expired(&self) -> usize;

    async fn count(&self) -> usize;
}
