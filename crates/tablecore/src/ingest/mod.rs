//! File ingest: extension-based format detection and parsing into a [`Table`]
//!
//! ```text
//!  document (file name + bytes)
//!        │
//!        ▼
//!   FileFormat::from_file_name ──► None ──► AppError::UnsupportedFormat
//!        │
//!        ▼
//!   csv_reader / excel_reader  ──► Table
//! ```

mod csv_reader;
mod excel_reader;

use crate::error::{AppError, AppResult};
use crate::table::Table;

pub use csv_reader::parse_csv;
pub use excel_reader::parse_excel;

/// Supported upload formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Excel,
}

impl FileFormat {
    /// Detects the format from the file name suffix (ASCII case-insensitive)
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let lower = file_name.trim().to_ascii_lowercase();
        if lower.ends_with(".csv") {
            Some(FileFormat::Csv)
        } else if lower.ends_with(".xlsx") || lower.ends_with(".xls") {
            Some(FileFormat::Excel)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Excel => "excel",
        }
    }
}

/// Parses bytes of a known format
pub fn parse_table(format: FileFormat, bytes: &[u8]) -> AppResult<Table> {
    match format {
        FileFormat::Csv => parse_csv(bytes),
        FileFormat::Excel => parse_excel(bytes),
    }
}

/// Detects the format from `file_name` and parses `bytes`
///
/// # Errors
/// * `AppError::UnsupportedFormat` - suffix is not `.csv`, `.xlsx` or `.xls`
/// * parse errors from the CSV or Excel reader
pub fn parse_upload(file_name: &str, bytes: &[u8]) -> AppResult<Table> {
    let format =
        FileFormat::from_file_name(file_name).ok_or_else(|| AppError::UnsupportedFormat(file_name.to_string()))?;
    let table = parse_table(format, bytes)?;
    log::debug!(
        "Parsed {} as {}: {} rows, {} columns",
        file_name,
        format.as_str(),
        table.row_count(),
        table.column_count()
    );
    Ok(table)
}
