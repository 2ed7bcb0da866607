//! Bot initialization
//!
//! This module contains:
//! - Command enum definition
//! - Bot instance creation
//! - Command registration in the Telegram UI

use reqwest::ClientBuilder;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use tablecore::config;

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "show the welcome message")]
    Start,
    #[command(description = "show basic statistics")]
    Stats,
    #[command(description = "generate a bar chart")]
    Plot,
}

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Missing token, invalid URL or HTTP client failure
pub fn create_bot() -> anyhow::Result<Bot> {
    if config::BOT_TOKEN.is_empty() {
        anyhow::bail!("TELEGRAM_TOKEN is not set");
    }

    let client = ClientBuilder::new().timeout(config::network::timeout()).build()?;
    let bot = Bot::with_client(config::BOT_TOKEN.as_str(), client);

    let bot = match config::BOT_API_URL.as_deref() {
        Some(bot_api_url) => {
            log::info!("Using custom Bot API URL: {}", bot_api_url);
            let url = url::Url::parse(bot_api_url).map_err(|e| anyhow::anyhow!("Invalid BOT_API_URL: {}", e))?;
            bot.set_api_url(url)
        }
        None => bot,
    };

    Ok(bot)
}

/// Sets up bot commands in Telegram UI
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(Command::bot_commands()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_command_descriptions() {
        let command_list = format!("{}", Command::descriptions());

        assert!(command_list.contains("Available commands"));
        assert!(command_list.contains("/start"));
        assert!(command_list.contains("/stats"));
        assert!(command_list.contains("/plot"));
    }

    #[test]
    fn test_command_parsing() {
        assert_eq!(Command::parse("/stats", "table_bot").unwrap(), Command::Stats);
        assert_eq!(Command::parse("/plot@table_bot", "table_bot").unwrap(), Command::Plot);
        assert!(Command::parse("/history", "table_bot").is_err());
    }

    #[test]
    fn test_registered_commands() {
        let names: Vec<String> = Command::bot_commands()
            .into_iter()
            .map(|c| c.command.trim_start_matches('/').to_string())
            .collect();
        assert_eq!(names, vec!["start", "stats", "plot"]);
    }
}
