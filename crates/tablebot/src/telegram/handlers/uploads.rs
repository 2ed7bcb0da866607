//! Document upload handler: CSV/Excel files replace the sender's session table

use teloxide::prelude::*;
use teloxide::types::{Document, Message};

use tablecore::analyst::{upload_error_text, UNSUPPORTED_FORMAT_TEXT};
use tablecore::config;
use tablecore::ingest::FileFormat;
use tablecore::{AppError, Reply};

use super::commands::send_reply;
use super::types::{session_key, HandlerDeps, HandlerError};

/// Handler for any message carrying a document
pub(super) fn document_upload_handler(deps: HandlerDeps) -> teloxide::dispatching::UpdateHandler<HandlerError> {
    use teloxide::dispatching::UpdateFilterExt;

    Update::filter_message()
        .filter(|msg: Message| msg.document().is_some())
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move {
                let reply = match msg.document() {
                    Some(document) => handle_document(&bot, &msg, document, &deps).await,
                    None => return Ok(()),
                };
                send_reply(&bot, msg.chat.id, reply).await
            }
        })
}

async fn handle_document(bot: &Bot, msg: &Message, document: &Document, deps: &HandlerDeps) -> Reply {
    let key = session_key(msg);
    let file_name = document.file_name.clone().unwrap_or_default();
    log::info!("📤 Upload from session {}: {:?} ({} bytes)", key, file_name, document.file.size);

    // Check the suffix before spending bandwidth on the download
    let format = match FileFormat::from_file_name(&file_name) {
        Some(format) => format,
        None => {
            log::info!("Session {}: rejected unsupported file {:?}", key, file_name);
            return Reply::text(UNSUPPORTED_FORMAT_TEXT);
        }
    };

    let max_size = *config::upload::MAX_FILE_SIZE_BYTES;
    if u64::from(document.file.size) > max_size {
        let err = AppError::Validation(format!(
            "file too large ({} bytes, limit {} bytes)",
            document.file.size, max_size
        ));
        log::warn!("Session {}: {}", key, err);
        return Reply::Text(upload_error_text(&err));
    }

    let bytes = match deps.files.fetch(bot, document).await {
        Ok(bytes) => bytes,
        Err(e) => {
            log::error!("❌ Session {}: failed to download {:?}: {}", key, file_name, e);
            return Reply::Text(upload_error_text(&e));
        }
    };

    let analyst = deps.analyst.clone();
    match tokio::task::spawn_blocking(move || analyst.upload_with_format(key, format, &file_name, &bytes)).await {
        Ok(reply) => reply,
        Err(e) => {
            log::error!("❌ Session {}: parse task failed: {}", key, e);
            Reply::Text(format!("❌ Error processing file: {}", e))
        }
    }
}
