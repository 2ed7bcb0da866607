//! Where uploaded document bytes come from

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::Document;

use tablecore::{AppError, AppResult};

/// Fetches the contents of a document attached to a message.
///
/// The upload handler only sees this trait; production goes through the Bot API.
#[async_trait]
pub trait FileFetcher: Send + Sync {
    async fn fetch(&self, bot: &Bot, document: &Document) -> AppResult<Vec<u8>>;
}

/// `getFile` followed by a download from the Bot API file endpoint
pub struct TelegramFiles;

#[async_trait]
impl FileFetcher for TelegramFiles {
    async fn fetch(&self, bot: &Bot, document: &Document) -> AppResult<Vec<u8>> {
        let file = bot.get_file(document.file.id.clone()).await?;
        let mut bytes = Vec::with_capacity(file.size as usize);
        bot.download_file(&file.path, &mut bytes).await?;
        log::debug!("Downloaded {} ({} bytes)", file.path, bytes.len());
        Ok(bytes)
    }
}

/// Serves documents from memory by file name; used when the Bot API file
/// endpoint is not reachable (offline runs and tests).
#[derive(Default, Clone)]
pub struct MemoryFiles {
    files: Arc<HashMap<String, Vec<u8>>>,
}

impl MemoryFiles {
    pub fn new(files: impl IntoIterator<Item = (String, Vec<u8>)>) -> Self {
        Self {
            files: Arc::new(files.into_iter().collect()),
        }
    }
}

#[async_trait]
impl FileFetcher for MemoryFiles {
    async fn fetch(&self, _bot: &Bot, document: &Document) -> AppResult<Vec<u8>> {
        let name = document.file_name.as_deref().unwrap_or_default();
        self.files
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::Validation(format!("no stored file named {:?}", name)))
    }
}
