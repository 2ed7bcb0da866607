use anyhow::Result;
use dotenvy::dotenv;
use teloxide::prelude::*;
use tokio::time::sleep;

use tablebot::cli::{Cli, Commands};
use tablebot::offline;
use tablebot::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps, Transport};
use tablecore::{config, init_logger, log_startup_configuration, Analyst};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, bot creation, transport setup).
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present, before any config is read
    let _ = dotenv();

    let cli = Cli::parse_args();

    // Log panics in handler tasks instead of losing them on stderr
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
        if let Some(msg) = panic_info.payload().downcast_ref::<&str>() {
            log::error!("Panic message: {}", msg);
        }
    }));

    // Initialize logger (console + file)
    init_logger(&config::LOG_FILE_PATH)?;

    match cli.command {
        Some(Commands::Run) | None => run_bot().await,
        Some(Commands::Stats { path }) => {
            let markdown = offline::stats_markdown(&path)?;
            println!("{}", markdown);
            Ok(())
        }
        Some(Commands::Plot { path, output }) => offline::write_plot(&path, &output),
    }
}

/// Connects to the Bot API and serves updates until Ctrl+C
async fn run_bot() -> Result<()> {
    let bot_init_start = std::time::Instant::now();
    log::info!("Starting bot...");
    log_startup_configuration();

    let bot = create_bot()?;

    // Retry while the Bot API is still initializing or unreachable
    let bot_info = {
        let mut startup_retry = 0;
        loop {
            match bot.get_me().await {
                Ok(info) => break info,
                Err(e) => {
                    let err_str = e.to_string();
                    let is_retryable = err_str.contains("restart")
                        || err_str.contains("network")
                        || err_str.contains("connection")
                        || err_str.contains("timed out")
                        || err_str.contains("Connection refused");

                    startup_retry += 1;
                    if startup_retry >= config::retry::STARTUP_MAX_RETRIES || !is_retryable {
                        return Err(anyhow::anyhow!(
                            "Failed to connect to Bot API after {} retries: {}",
                            startup_retry,
                            e
                        ));
                    }

                    log::warn!(
                        "Bot API not ready (attempt {}/{}): {}. Retrying in {} seconds...",
                        startup_retry,
                        config::retry::STARTUP_MAX_RETRIES,
                        err_str,
                        config::retry::STARTUP_DELAY_SECS
                    );
                    sleep(config::retry::startup_delay()).await;
                }
            }
        }
    };
    log::info!("Bot username: {:?}, Bot ID: {}", bot_info.username, bot_info.id);

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to register bot commands: {}", e);
    }

    let deps = HandlerDeps::new(Analyst::default());
    let handler = schema(deps);

    let transport = Transport::select(config::PUBLIC_URL.as_deref(), *config::PORT, &config::BOT_TOKEN)?;

    log::info!("================================================");
    log::info!(
        "🎉 Bot initialization complete in {:.2}s",
        bot_init_start.elapsed().as_secs_f64()
    );
    log::info!("📡 Ready to receive updates!");
    log::info!("================================================");

    transport.run(bot, handler).await
}
