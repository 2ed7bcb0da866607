//! tablebot - Telegram front end for tablecore
//!
//! # Module Structure
//!
//! - `cli`: command line arguments
//! - `offline`: the `stats` / `plot` subcommands on local files
//! - `telegram`: bot creation, dispatcher schema and transports

pub mod cli;
pub mod offline;
pub mod telegram;

pub use telegram::{create_bot, schema, setup_bot_commands, HandlerDeps, Transport};
