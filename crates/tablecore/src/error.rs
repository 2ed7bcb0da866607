use thiserror::Error;

/// Centralized error types for the application
///
/// Every failure a handler can hit is converted to this enum and then into a
/// plain-text reply. Uses `thiserror` for automatic error conversion and display formatting.
///
/// # Example
///
/// ```no_run
/// use tablecore::error::AppError;
///
/// fn handle_error(err: AppError) {
///     eprintln!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// File suffix is neither `.csv` nor `.xlsx`/`.xls`
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// CSV tokenizer / decoding errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Spreadsheet errors
    #[error("Excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// Structural problems found while building a table
    #[error("{0}")]
    Parse(String),

    /// Stats or plot requested before any file was uploaded
    #[error("No data loaded")]
    NoData,

    /// Table has nothing to describe or plot
    #[error("No numeric columns")]
    NoNumericColumns,

    /// Chart drawing or PNG encoding errors
    #[error("Render error: {0}")]
    Render(String),

    /// Telegram API errors
    #[cfg(feature = "telegram")]
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// File download errors
    #[cfg(feature = "telegram")]
    #[error("Download error: {0}")]
    Download(#[from] teloxide::DownloadError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// True for errors produced while turning bytes into a table
    pub fn is_parse_error(&self) -> bool {
        matches!(self, AppError::Csv(_) | AppError::Excel(_) | AppError::Parse(_))
    }
}
