//! Platform-neutral command handling: session lookups plus stats/plot calls,
//! with every error already turned into the text the user sees.

use std::sync::Arc;

use indoc::indoc;

use crate::error::{AppError, AppResult};
use crate::ingest::{self, FileFormat};
use crate::plot;
use crate::session::{SessionKey, SessionStore};
use crate::stats;
use crate::table::Table;

/// Telegram refuses text messages longer than this
pub const MAX_MESSAGE_LEN: usize = 4096;

pub const WELCOME_TEXT: &str = indoc! {"
    📊 Data Analytics Bot

    Send me a CSV/Excel file to analyze!
    Available commands:
    /stats - Show basic statistics
    /plot - Generate a bar chart"};

pub const UNSUPPORTED_FORMAT_TEXT: &str = "❌ Only CSV/Excel files supported!";
pub const NO_DATA_TEXT: &str = "❌ No data loaded! Send a file first.";
pub const NO_NUMERIC_TEXT: &str = "❌ No numeric columns to analyze.";
pub const PLOT_CAPTION: &str = "📊 Here's your visualization";
pub const STATS_FILE_NAME: &str = "statistics.md";

/// What the bot should send back
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Plain text, no parse mode
    Text(String),
    /// Text already escaped for MarkdownV2
    Markdown(String),
    /// PNG image with a caption
    Photo { png: Vec<u8>, caption: String },
    /// File attachment with a caption
    Document {
        bytes: Vec<u8>,
        file_name: String,
        caption: String,
    },
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text(text.into())
    }

    /// Text content for text-like replies
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Reply::Text(text) | Reply::Markdown(text) => Some(text),
            _ => None,
        }
    }
}

/// User-facing text for a failed upload
pub fn upload_error_text(err: &AppError) -> String {
    match err {
        AppError::UnsupportedFormat(_) => UNSUPPORTED_FORMAT_TEXT.to_string(),
        other => format!("❌ Error processing file: {}", other),
    }
}

/// Loaded-file confirmation
pub fn loaded_text(table: &Table) -> String {
    format!(
        "✅ Loaded {} rows, {} columns\nUse /stats or /plot to analyze",
        table.row_count(),
        table.column_count()
    )
}

/// Escapes the two characters MarkdownV2 treats specially inside ``` blocks
fn escape_code(text: &str) -> String {
    text.replace('\\', "\\\\").replace('`', "\\`")
}

/// Session-backed command handler shared by every transport
#[derive(Clone, Default)]
pub struct Analyst {
    sessions: SessionStore,
}

impl Analyst {
    pub fn new(sessions: SessionStore) -> Self {
        Self { sessions }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// `/start`
    pub fn start(&self) -> Reply {
        Reply::text(WELCOME_TEXT)
    }

    /// Document upload: parse and, only on success, replace the session table.
    pub fn upload(&self, key: SessionKey, file_name: &str, bytes: &[u8]) -> Reply {
        match FileFormat::from_file_name(file_name) {
            Some(format) => self.upload_with_format(key, format, file_name, bytes),
            None => {
                log::info!("Session {}: rejected unsupported file {}", key, file_name);
                Reply::text(UNSUPPORTED_FORMAT_TEXT)
            }
        }
    }

    /// Upload whose format was already checked by the caller
    pub fn upload_with_format(&self, key: SessionKey, format: FileFormat, file_name: &str, bytes: &[u8]) -> Reply {
        match ingest::parse_table(format, bytes) {
            Ok(table) => {
                let reply = Reply::Text(loaded_text(&table));
                log::info!(
                    "Session {}: loaded {} as {} ({} rows, {} columns)",
                    key,
                    file_name,
                    format.as_str(),
                    table.row_count(),
                    table.column_count()
                );
                self.sessions.load(key, table);
                reply
            }
            Err(e) => {
                log::warn!("Session {}: failed to parse {}: {}", key, file_name, e);
                Reply::Text(upload_error_text(&e))
            }
        }
    }

    fn current_table(&self, key: SessionKey) -> AppResult<Arc<Table>> {
        self.sessions.get(key).ok_or(AppError::NoData)
    }

    /// `/stats`
    pub fn stats(&self, key: SessionKey) -> Reply {
        let table = match self.current_table(key) {
            Ok(table) => table,
            Err(e) => {
                log::info!("Session {}: {}", key, e);
                return Reply::text(NO_DATA_TEXT);
            }
        };

        let description = match stats::describe(&table) {
            Ok(description) => description,
            Err(AppError::NoNumericColumns) => return Reply::text(NO_NUMERIC_TEXT),
            Err(e) => return Reply::Text(format!("❌ Error computing statistics: {}", e)),
        };

        let markdown = description.to_markdown();
        let text = format!("📈 *Basic Statistics*\n```\n{}\n```", escape_code(&markdown));
        if text.chars().count() <= MAX_MESSAGE_LEN {
            Reply::Markdown(text)
        } else {
            Reply::Document {
                bytes: markdown.into_bytes(),
                file_name: STATS_FILE_NAME.to_string(),
                caption: "📈 Basic Statistics (too wide for a message)".to_string(),
            }
        }
    }

    /// `/plot`
    ///
    /// Rendering is CPU bound; async callers should run this on the blocking pool.
    pub fn plot(&self, key: SessionKey) -> Reply {
        let table = match self.current_table(key) {
            Ok(table) => table,
            Err(e) => {
                log::info!("Session {}: {}", key, e);
                return Reply::text(NO_DATA_TEXT);
            }
        };

        match plot::render_bar_chart(&table) {
            Ok(png) => Reply::Photo {
                png,
                caption: PLOT_CAPTION.to_string(),
            },
            Err(AppError::NoNumericColumns) => Reply::Text("❌ Error generating plot: no numeric data to plot".to_string()),
            Err(e) => {
                log::error!("Session {}: plot failed: {}", key, e);
                Reply::Text(format!("❌ Error generating plot: {}", e))
            }
        }
    }
}
