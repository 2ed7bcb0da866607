//! Telegram bot handler tree configuration
//!
//! This module provides the main dispatcher schema for the Telegram bot.
//! Integration tests run the same handler tree as production code.

mod commands;
mod files;
mod schema;
mod types;
mod uploads;

pub use files::{FileFetcher, MemoryFiles, TelegramFiles};
pub use schema::schema;
pub use types::{session_key, HandlerDeps, HandlerError};
