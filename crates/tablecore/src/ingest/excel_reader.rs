use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use crate::error::{AppError, AppResult};
use crate::table::{Cell, Table};

/// Parses an `.xlsx`/`.xls` workbook held in memory.
///
/// Only the first worksheet is read; its first row is the header.
pub fn parse_excel(bytes: &[u8]) -> AppResult<Table> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::Parse("Excel file has no worksheets".to_string()))??;

    let mut rows = range.rows();
    let header: Vec<String> = match rows.next() {
        Some(row) => row.iter().map(header_text).collect(),
        None => return Err(AppError::Parse("No columns to parse from file".to_string())),
    };

    let body: Vec<Vec<Cell>> = rows.map(|row| row.iter().map(to_cell).collect()).collect();

    Table::from_rows(header, body)
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

fn to_cell(cell: &Data) -> Cell {
    match cell {
        Data::Int(value) => Cell::Number(*value as f64),
        Data::Float(value) if value.is_nan() => Cell::Empty,
        Data::Float(value) => Cell::Number(*value),
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) if s.trim().is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        other => Cell::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ColumnData;
    use pretty_assertions::assert_eq;
    use rust_xlsxwriter::Workbook;

    /// `name, units, note` with a blank cell in row 2, plus a second sheet that must be ignored
    fn sample_workbook() -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "name").unwrap();
        sheet.write_string(0, 1, "units").unwrap();
        sheet.write_string(0, 2, "note").unwrap();
        sheet.write_string(1, 0, "a").unwrap();
        sheet.write_number(1, 1, 10).unwrap();
        sheet.write_string(1, 2, "first").unwrap();
        sheet.write_string(2, 0, "b").unwrap();
        sheet.write_number(2, 1, 20.5).unwrap();

        let other = workbook.add_worksheet();
        other.write_string(0, 0, "ignored").unwrap();
        other.write_number(1, 0, 1).unwrap();

        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_reads_first_sheet_with_typed_columns() {
        let table = parse_excel(&sample_workbook()).unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 3);
        assert!(table.column("ignored").is_none());
        assert_eq!(
            table.column("units").unwrap().numeric_values().unwrap(),
            &[Some(10.0), Some(20.5)]
        );
        assert_eq!(
            table.column("name").unwrap().data,
            ColumnData::Text(vec![Some("a".to_string()), Some("b".to_string())])
        );
        assert_eq!(
            table.column("note").unwrap().data,
            ColumnData::Text(vec![Some("first".to_string()), None])
        );
    }

    #[test]
    fn test_cell_mapping() {
        assert_eq!(to_cell(&Data::Int(7)), Cell::Number(7.0));
        assert_eq!(to_cell(&Data::Float(2.5)), Cell::Number(2.5));
        assert_eq!(to_cell(&Data::Empty), Cell::Empty);
        assert_eq!(to_cell(&Data::String("  ".into())), Cell::Empty);
        assert_eq!(to_cell(&Data::String("12".into())), Cell::Text("12".into()));
        assert_eq!(to_cell(&Data::Bool(true)), Cell::Text("true".into()));
    }

    #[test]
    fn test_header_text() {
        assert_eq!(header_text(&Data::String(" revenue ".into())), "revenue");
        assert_eq!(header_text(&Data::Empty), "");
        assert_eq!(header_text(&Data::Int(2024)), "2024");
    }

    #[test]
    fn test_not_a_workbook() {
        let err = parse_excel(b"PK\x03\x04 truncated zip").unwrap_err();
        assert!(matches!(err, AppError::Excel(_)));
    }
}
