//! Logging initialization and startup configuration report

use anyhow::Result;
use simplelog::*;
use std::fs::File;

use crate::config;

/// Initialize logger for both console and file output
///
/// # Arguments
/// * `log_file_path` - Path to the log file
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Failed to create the file or a logger was already installed
pub fn init_logger(log_file_path: &str) -> Result<()> {
    let log_file = File::create(log_file_path).map_err(|e| anyhow::anyhow!("Failed to create log file: {}", e))?;

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, Config::default(), log_file),
    ])
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs the effective configuration at application startup
///
/// The token itself is never printed, only whether it is set.
pub fn log_startup_configuration() {
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("📊 tablebot configuration");
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    if config::BOT_TOKEN.is_empty() {
        log::error!("❌ TELEGRAM_TOKEN: not set");
    } else {
        log::info!("✅ TELEGRAM_TOKEN: set");
    }

    match config::PUBLIC_URL.as_deref() {
        Some(url) => log::info!("🌐 Public URL: {} (webhook mode, port {})", url, *config::PORT),
        None => log::info!("🔁 Public URL: not set (long polling mode)"),
    }

    if let Some(ref api_url) = *config::BOT_API_URL {
        log::info!("🛰  Bot API URL: {}", api_url);
    }

    log::info!(
        "📎 Max upload size: {:.1} MB",
        *config::upload::MAX_FILE_SIZE_BYTES as f64 / (1024.0 * 1024.0)
    );

    match config::plot::FONT_PATH.as_deref() {
        Some(path) => log::info!("🔤 Chart font: {}", path),
        None => log::info!("🔤 Chart font: auto-detect"),
    }
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::NamedTempFile;

    #[test]
    fn test_init_logger_creates_log_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        // A second init in the same test binary fails, so only the file is checked.
        let _ = init_logger(path);

        assert!(temp_file.path().exists());
    }

    #[test]
    fn test_init_logger_rejects_missing_directory() {
        let result = init_logger("/definitely/not/a/dir/tablebot.log");
        assert!(result.is_err());
    }
}
