use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Configuration constants for the bot
/// Bot token
/// Read from TELEGRAM_TOKEN, BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("TELEGRAM_TOKEN")
        .or_else(|_| env::var("BOT_TOKEN"))
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_default()
});

/// Port the webhook HTTP server listens on
/// Read from PORT environment variable
/// Default: 8000
pub static PORT: Lazy<u16> = Lazy::new(|| parse_port(env::var("PORT").ok().as_deref()));

/// Public base URL of the deployment
/// Read from RAILWAY_STATIC_URL (or PUBLIC_URL) environment variable
/// When present and non-empty the bot runs in webhook mode, otherwise long polling
pub static PUBLIC_URL: Lazy<Option<String>> = Lazy::new(|| {
    env::var("RAILWAY_STATIC_URL")
        .or_else(|_| env::var("PUBLIC_URL"))
        .ok()
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
});

/// Custom Bot API server URL (local telegram-bot-api)
/// Read from BOT_API_URL environment variable
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| env::var("BOT_API_URL").ok());

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: tablebot.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "tablebot.log".to_string()));

/// Default port when PORT is unset or invalid
pub const DEFAULT_PORT: u16 = 8000;

fn parse_port(raw: Option<&str>) -> u16 {
    raw.and_then(|s| s.trim().parse::<u16>().ok()).unwrap_or(DEFAULT_PORT)
}

/// Upload limits
pub mod upload {
    use super::{env, Lazy};

    /// Bot API refuses `getFile` for anything above 20 MB
    pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 20 * 1024 * 1024;

    /// Largest document the bot will try to download
    /// Read from MAX_FILE_SIZE_BYTES environment variable
    pub static MAX_FILE_SIZE_BYTES: Lazy<u64> = Lazy::new(|| {
        env::var("MAX_FILE_SIZE_BYTES")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_MAX_FILE_SIZE_BYTES)
    });
}

/// Chart rendering configuration
pub mod plot {
    use super::{env, Lazy};

    /// Chart width in pixels (10 inches at 100 dpi)
    pub const WIDTH: u32 = 1000;

    /// Chart height in pixels (6 inches at 100 dpi)
    pub const HEIGHT: u32 = 600;

    /// Title drawn above every chart
    pub const TITLE: &str = "Data Visualization";

    /// Explicit font file for chart text
    /// Read from PLOT_FONT_PATH environment variable
    pub static FONT_PATH: Lazy<Option<String>> = Lazy::new(|| env::var("PLOT_FONT_PATH").ok());

    /// Fonts tried in order when PLOT_FONT_PATH is not set
    pub const FALLBACK_FONT_PATHS: &[&str] = &[
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "/Library/Fonts/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ];
}

/// Network configuration
pub mod network {
    use super::{env, Duration, Lazy};

    /// HTTP client timeout for Bot API requests (in seconds)
    pub static TIMEOUT_SECS: Lazy<u64> = Lazy::new(|| {
        env::var("NETWORK_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(60)
    });

    /// HTTP client timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(*TIMEOUT_SECS)
    }
}

/// Startup retry configuration
pub mod retry {
    use super::Duration;

    /// How many times `get_me` is retried while the Bot API is unreachable
    pub const STARTUP_MAX_RETRIES: u32 = 60;

    /// Pause between startup attempts (in seconds)
    pub const STARTUP_DELAY_SECS: u64 = 5;

    /// Startup retry delay duration
    pub fn startup_delay() -> Duration {
        Duration::from_secs(STARTUP_DELAY_SECS)
    }
}
