//! tablecore - table ingest, per-user sessions, statistics and charts for tablebot
//!
//! Nothing in here talks to Telegram; the bot crate maps [`analyst::Reply`]
//! values onto API calls.
//!
//! # Module Structure
//!
//! - `config`, `error`, `logging`: ambient configuration, error type and logger setup
//! - `table`: the in-memory table model
//! - `ingest`: CSV / Excel parsing with extension-based format detection
//! - `session`: per-user table store
//! - `stats`: descriptive statistics and their markdown rendering
//! - `plot`: bar chart rendering to PNG
//! - `analyst`: command handling on top of the above

pub mod analyst;
pub mod config;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod plot;
pub mod session;
pub mod stats;
pub mod table;

// Re-exports for convenience
pub use analyst::{Analyst, Reply};
pub use error::{AppError, AppResult};
pub use logging::{init_logger, log_startup_configuration};
pub use session::{SessionKey, SessionStore};
pub use table::Table;
