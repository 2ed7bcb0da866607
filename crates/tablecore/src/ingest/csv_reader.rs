use crate::error::{AppError, AppResult};
use crate::table::{Cell, Table};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parses comma-separated bytes; the first record is the header.
pub fn parse_csv(bytes: &[u8]) -> AppResult<Table> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    check_quotes(bytes)?;

    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut records = reader
        .records()
        .filter(|record| !matches!(record, Ok(r) if is_blank(r)));

    let header: Vec<String> = match records.next() {
        Some(record) => record?.iter().map(|field| field.trim().to_string()).collect(),
        None => return Err(AppError::Parse("No columns to parse from file".to_string())),
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        rows.push(record.iter().map(Cell::from_text).collect());
    }

    Table::from_rows(header, rows)
}

fn is_blank(record: &::csv::StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

/// Rejects input that ends inside a quoted field.
///
/// The `csv` reader silently swallows everything up to EOF into such a field,
/// which would turn a broken file into a one-row table.
fn check_quotes(bytes: &[u8]) -> AppResult<()> {
    let mut line = 1usize;
    let mut at_field_start = true;
    let mut quoted_since: Option<usize> = None;
    let mut iter = bytes.iter().peekable();

    while let Some(&byte) = iter.next() {
        match quoted_since {
            Some(_) => {
                if byte == b'"' {
                    if iter.peek() == Some(&&b'"') {
                        iter.next();
                    } else {
                        quoted_since = None;
                    }
                } else if is_line_end(byte, iter.peek().copied()) {
                    line += 1;
                }
            }
            None => match byte {
                b'"' if at_field_start => {
                    quoted_since = Some(line);
                    at_field_start = false;
                }
                b',' => at_field_start = true,
                b'\n' | b'\r' => {
                    if is_line_end(byte, iter.peek().copied()) {
                        line += 1;
                    }
                    at_field_start = true;
                }
                _ => at_field_start = false,
            },
        }
    }

    match quoted_since {
        Some(start) => Err(AppError::Parse(format!("EOF inside string starting at line {}", start))),
        None => Ok(()),
    }
}

/// `\n`, or a bare `\r` (old Mac line endings); the `\r` of `\r\n` is not counted
fn is_line_end(byte: u8, next: Option<&u8>) -> bool {
    byte == b'\n' || (byte == b'\r' && next != Some(&b'\n'))
}
