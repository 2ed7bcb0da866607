//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::commands::{handle_plot_command, handle_start_command, handle_stats_command};
use super::types::{HandlerDeps, HandlerError};
use super::uploads::document_upload_handler;
use crate::telegram::bot::Command;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// The same schema is used in production and in integration tests.
/// Updates that match no branch fall through to the dispatcher's default
/// handler and are ignored.
///
/// # Arguments
/// * `deps` - Handler dependencies (analyst and bot identity)
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_commands = deps.clone();
    let deps_uploads = deps;

    dptree::entry()
        .branch(command_handler(deps_commands))
        .branch(document_upload_handler(deps_uploads))
}

/// Handler for the commands in [`Command`]
fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                log::info!("🎯 Received command: {:?} from chat {}", cmd, msg.chat.id);

                let result = match cmd {
                    Command::Start => handle_start_command(&bot, &msg, &deps).await,
                    Command::Stats => handle_stats_command(&bot, &msg, &deps).await,
                    Command::Plot => handle_plot_command(&bot, &msg, &deps).await,
                };

                if let Err(e) = &result {
                    log::error!("❌ Failed to reply to {:?} in chat {}: {}", cmd, msg.chat.id, e);
                }
                result
            }
        },
    ))
}
