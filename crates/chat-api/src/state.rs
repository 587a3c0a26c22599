use std::sync::Arc;

use chat_core::services::ChatService;

use crate::view::PageRenderer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatService>,
    pub pages: Arc<PageRenderer>,
}

impl AppState {
    pub fn new(chat: Arc<ChatService>, pages: Arc<PageRenderer>) -> Self {
        Self { chat, pages }
    }
}
