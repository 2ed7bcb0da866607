//! Handler types, dependencies, and session key extraction

use std::sync::Arc;

use teloxide::types::Message;

use tablecore::{Analyst, SessionKey};

use super::files::{FileFetcher, TelegramFiles};

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub analyst: Analyst,
    pub files: Arc<dyn FileFetcher>,
}

impl HandlerDeps {
    /// Create new handler dependencies; documents are downloaded from the Bot API
    pub fn new(analyst: Analyst) -> Self {
        Self {
            analyst,
            files: Arc::new(TelegramFiles),
        }
    }

    /// Replaces the document source
    pub fn with_files(mut self, files: Arc<dyn FileFetcher>) -> Self {
        self.files = files;
        self
    }
}

/// Session key for a message: the sender's user id, or the chat id for
/// messages without a sender (channel posts).
pub fn session_key(msg: &Message) -> SessionKey {
    msg.from
        .as_ref()
        .and_then(|u| i64::try_from(u.id.0).ok())
        .unwrap_or(msg.chat.id.0)
}
