//! In-memory table model shared by ingest, stats and plot

use crate::error::{AppError, AppResult};

/// Cell tokens treated as missing values
pub const NA_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "#N/A", "<NA>",
];

/// A single parsed cell before column types are inferred
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Classifies a raw text field. Numbers are recognised the same way for every
    /// source so `"1"`, `"1.5"` and `"1e3"` all land in a numeric column.
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if NA_TOKENS.contains(&trimmed) {
            return Cell::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(value) if !value.is_nan() => Cell::Number(value),
            _ => Cell::Text(raw.to_string()),
        }
    }

    fn into_text(self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Number(value) => Some(format_number(value)),
            Cell::Text(text) => Some(text),
        }
    }
}

/// Typed column values
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

/// Named column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn is_numeric(&self) -> bool {
        matches!(self.data, ColumnData::Numeric(_))
    }

    /// Numeric values with missing cells preserved; `None` for text columns
    pub fn numeric_values(&self) -> Option<&[Option<f64>]> {
        match &self.data {
            ColumnData::Numeric(values) => Some(values),
            ColumnData::Text(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Numeric(values) => values.len(),
            ColumnData::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parsed tabular data: named columns of equal length
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Builds a table from a header row and data rows of cells.
    ///
    /// Short rows are padded with missing cells; rows wider than the header are
    /// rejected. A column is numeric when every non-missing cell is a number.
    pub fn from_rows(header: Vec<String>, rows: Vec<Vec<Cell>>) -> AppResult<Self> {
        if header.is_empty() {
            return Err(AppError::Parse("No columns to parse from file".to_string()));
        }

        let width = header.len();
        let row_count = rows.len();
        let mut cells_by_column: Vec<Vec<Cell>> = (0..width).map(|_| Vec::with_capacity(row_count)).collect();

        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() > width {
                // +2: one for the header line, one for 1-based numbering
                return Err(AppError::Parse(format!(
                    "Expected {} fields in line {}, saw {}",
                    width,
                    idx + 2,
                    row.len()
                )));
            }
            let mut row = row.into_iter();
            for column in cells_by_column.iter_mut() {
                column.push(row.next().unwrap_or(Cell::Empty));
            }
        }

        let names = dedupe_headers(header);
        let columns = names
            .into_iter()
            .zip(cells_by_column)
            .map(|(name, cells)| Column {
                name,
                data: infer_column(cells),
            })
            .collect();

        Ok(Self { columns, row_count })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn numeric_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_numeric())
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

fn infer_column(cells: Vec<Cell>) -> ColumnData {
    let all_numeric = cells.iter().all(|c| matches!(c, Cell::Empty | Cell::Number(_)));
    if all_numeric {
        ColumnData::Numeric(
            cells
                .into_iter()
                .map(|c| match c {
                    Cell::Number(value) => Some(value),
                    _ => None,
                })
                .collect(),
        )
    } else {
        ColumnData::Text(cells.into_iter().map(Cell::into_text).collect())
    }
}

/// Blank headers become `Unnamed: {idx}`, repeated ones get `.1`, `.2`, ...
fn dedupe_headers(header: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(header.len());
    for (idx, raw) in header.into_iter().enumerate() {
        let base = if raw.trim().is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            raw
        };
        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{}.{}", base, suffix);
            suffix += 1;
        }
        seen.push(name);
    }
    seen
}

/// `%g`-style rendering with 6 significant digits, as used in stats output
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf".to_string() } else { "-inf".to_string() };
    }
    if value == 0.0 {
        return "0".to_string();
    }

    // Round to 6 significant digits first so a carry (999999.5 -> 1e+06)
    // moves the exponent before the notation is picked.
    let rounded = format!("{:.5e}", value);
    let (mantissa, exp) = rounded.split_once('e').unwrap_or((rounded.as_str(), "0"));
    let exponent: i32 = exp.parse().unwrap_or(0);

    if !(-4..6).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs());
    }

    let decimals = (5 - exponent).max(0) as usize;
    trim_fraction(&format!("{:.*}", decimals, value)).to_string()
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text_row(values: &[&str]) -> Vec<Cell> {
        values.iter().map(|v| Cell::from_text(v)).collect()
    }

    #[test]
    fn test_cell_classification() {
        assert_eq!(Cell::from_text("42"), Cell::Number(42.0));
        assert_eq!(Cell::from_text(" 1.5 "), Cell::Number(1.5));
        assert_eq!(Cell::from_text("1e3"), Cell::Number(1000.0));
        assert_eq!(Cell::from_text(""), Cell::Empty);
        assert_eq!(Cell::from_text("NA"), Cell::Empty);
        assert_eq!(Cell::from_text("nan"), Cell::Empty);
        assert_eq!(Cell::from_text("abc"), Cell::Text("abc".to_string()));
    }

    #[test]
    fn test_column_inference() {
        let table = Table::from_rows(
            vec!["name".into(), "age".into(), "score".into()],
            vec![
                text_row(&["alice", "30", "1.5"]),
                text_row(&["bob", "", "2"]),
                text_row(&["carol", "41", "n/a"]),
            ],
        )
        .unwrap();

        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 3);
        assert!(!table.column("name").unwrap().is_numeric());
        assert_eq!(
            table.column("age").unwrap().numeric_values().unwrap(),
            &[Some(30.0), None, Some(41.0)]
        );
        assert_eq!(
            table.column("score").unwrap().numeric_values().unwrap(),
            &[Some(1.5), Some(2.0), None]
        );
    }

    #[test]
    fn test_mixed_column_becomes_text() {
        let table = Table::from_rows(
            vec!["mixed".into()],
            vec![text_row(&["1"]), text_row(&["two"]), text_row(&[""])],
        )
        .unwrap();

        let column = table.column("mixed").unwrap();
        assert_eq!(
            column.data,
            ColumnData::Text(vec![Some("1".to_string()), Some("two".to_string()), None])
        );
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = Table::from_rows(vec!["a".into(), "b".into()], vec![text_row(&["1"])]).unwrap();
        assert_eq!(table.column("b").unwrap().numeric_values().unwrap(), &[None]);
    }

    #[test]
    fn test_wide_row_is_rejected() {
        let err = Table::from_rows(
            vec!["a".into(), "b".into()],
            vec![text_row(&["1", "2"]), text_row(&["1", "2", "3"])],
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Expected 2 fields in line 3, saw 3");
    }

    #[test]
    fn test_empty_header_is_rejected() {
        let err = Table::from_rows(vec![], vec![]).unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_header_dedupe() {
        let names = dedupe_headers(vec!["a".into(), "a".into(), "".into(), "a".into()]);
        assert_eq!(names, vec!["a", "a.1", "Unnamed: 2", "a.2"]);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(1.2909944487358056), "1.29099");
        assert_eq!(format_number(-0.25), "-0.25");
        assert_eq!(format_number(123456.0), "123456");
        assert_eq!(format_number(1234567.0), "1.23457e+06");
        assert_eq!(format_number(0.0000123), "1.23e-05");
        assert_eq!(format_number(f64::NAN), "nan");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn test_format_number_rounding_carries_exponent() {
        assert_eq!(format_number(999999.5), "1e+06");
        assert_eq!(format_number(-999999.5), "-1e+06");
        assert_eq!(format_number(0.000099999995), "0.0001");
        assert_eq!(format_number(99999.95), "99999.9");
        assert_eq!(format_number(9.9999996), "10");
    }
}
