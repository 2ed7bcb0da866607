//! Update transport: long polling or an axum webhook server
//!
//! The transport is picked once at startup from the environment. Both
//! variants feed the same dispatcher schema.

use std::net::SocketAddr;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::update_listeners::webhooks::{self, Options};
use teloxide::update_listeners::Polling;
use url::Url;

use super::handlers::HandlerError;

/// How updates reach the dispatcher
#[derive(Debug, Clone, PartialEq)]
pub enum Transport {
    /// Pull updates with `getUpdates`
    Polling,
    /// Telegram pushes updates to `url`; the HTTP server binds `addr`
    Webhook { url: Url, addr: SocketAddr },
}

impl Transport {
    /// Webhook when `public_url` is set and non-empty, polling otherwise.
    ///
    /// The webhook path is the bot token, so only Telegram knows the endpoint.
    /// A public URL without a scheme (as Railway provides it) gets `https://`.
    pub fn select(public_url: Option<&str>, port: u16, token: &str) -> anyhow::Result<Self> {
        let public_url = match public_url.map(str::trim).filter(|u| !u.is_empty()) {
            Some(public_url) => public_url,
            None => return Ok(Transport::Polling),
        };

        let base = if public_url.starts_with("http://") || public_url.starts_with("https://") {
            public_url.to_string()
        } else {
            format!("https://{}", public_url)
        };
        let url = Url::parse(&format!("{}/{}", base.trim_end_matches('/'), token))
            .map_err(|e| anyhow::anyhow!("Invalid public URL {:?}: {}", public_url, e))?;

        Ok(Transport::Webhook {
            url,
            addr: SocketAddr::from(([0, 0, 0, 0], port)),
        })
    }

    pub fn is_webhook(&self) -> bool {
        matches!(self, Transport::Webhook { .. })
    }

    /// Runs the dispatcher over this transport until Ctrl+C
    pub async fn run(self, bot: Bot, handler: UpdateHandler<HandlerError>) -> anyhow::Result<()> {
        let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
            .enable_ctrlc_handler()
            .build();

        match self {
            Transport::Polling => {
                log::info!("Starting bot in long polling mode");
                // Create polling listener that drops pending updates on start
                let listener = Polling::builder(bot).drop_pending_updates().build();
                dispatcher
                    .dispatch_with_listener(
                        listener,
                        LoggingErrorHandler::with_custom_text("An error from the update listener"),
                    )
                    .await;
            }
            Transport::Webhook { url, addr } => {
                log::info!("Starting bot in webhook mode on {} (path {})", addr, redact_path(&url));
                let listener = webhooks::axum(bot, Options::new(addr, url))
                    .await
                    .map_err(|e| anyhow::anyhow!("Failed to set up webhook: {}", e))?;
                dispatcher
                    .dispatch_with_listener(
                        listener,
                        LoggingErrorHandler::with_custom_text("An error from the webhook listener"),
                    )
                    .await;
            }
        }

        log::info!("Dispatcher shutdown gracefully");
        Ok(())
    }
}

/// Webhook URL without the token, for logs
fn redact_path(url: &Url) -> String {
    format!("{}/<token>", url.origin().ascii_serialization())
}
