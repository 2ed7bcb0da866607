//! Command handler implementations (/start, /stats, /plot) and reply delivery

use teloxide::prelude::*;
use teloxide::types::{InputFile, Message, ParseMode};

use tablecore::Reply;

use super::types::{session_key, HandlerDeps, HandlerError};

/// Sends an analyst reply to `chat_id`
pub(super) async fn send_reply(bot: &Bot, chat_id: ChatId, reply: Reply) -> Result<(), HandlerError> {
    match reply {
        Reply::Text(text) => {
            bot.send_message(chat_id, text).await?;
        }
        Reply::Markdown(text) => {
            bot.send_message(chat_id, text).parse_mode(ParseMode::MarkdownV2).await?;
        }
        Reply::Photo { png, caption } => {
            bot.send_photo(chat_id, InputFile::memory(png).file_name("plot.png"))
                .caption(caption)
                .await?;
        }
        Reply::Document {
            bytes,
            file_name,
            caption,
        } => {
            bot.send_document(chat_id, InputFile::memory(bytes).file_name(file_name))
                .caption(caption)
                .await?;
        }
    }
    Ok(())
}

/// Handle /start command
pub(super) async fn handle_start_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    send_reply(bot, msg.chat.id, deps.analyst.start()).await
}

/// Handle /stats command
pub(super) async fn handle_stats_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let key = session_key(msg);
    log::info!("Stats command called for session {}", key);

    let reply = deps.analyst.stats(key);
    send_reply(bot, msg.chat.id, reply).await
}

/// Handle /plot command
///
/// Rendering runs on the blocking pool so a large chart does not stall
/// other chats.
pub(super) async fn handle_plot_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let key = session_key(msg);
    log::info!("Plot command called for session {}", key);

    let analyst = deps.analyst.clone();
    let reply = match tokio::task::spawn_blocking(move || analyst.plot(key)).await {
        Ok(reply) => reply,
        Err(e) => {
            log::error!("❌ Plot task failed for session {}: {}", key, e);
            Reply::Text(format!("❌ Error generating plot: {}", e))
        }
    };

    send_reply(bot, msg.chat.id, reply).await
}
