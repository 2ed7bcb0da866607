//! Descriptive statistics over the numeric columns of a table

use crate::error::{AppError, AppResult};
use crate::table::{format_number, Table};

/// Row labels of the statistics table, in display order
pub const STAT_LABELS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Summary of one numeric column. Missing values are skipped; every field but
/// `count` is NaN when the column has no values (and `std` when it has one).
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnSummary {
    pub fn from_values(name: &str, values: &[Option<f64>]) -> Self {
        let mut sorted: Vec<f64> = values.iter().flatten().copied().collect();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let mean = if count == 0 {
            f64::NAN
        } else {
            sorted.iter().sum::<f64>() / count as f64
        };
        let std = if count < 2 {
            f64::NAN
        } else {
            let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (count - 1) as f64).sqrt()
        };

        Self {
            name: name.to_string(),
            count,
            mean,
            std,
            min: sorted.first().copied().unwrap_or(f64::NAN),
            q25: percentile(&sorted, 0.25),
            q50: percentile(&sorted, 0.50),
            q75: percentile(&sorted, 0.75),
            max: sorted.last().copied().unwrap_or(f64::NAN),
        }
    }

    /// Values in [`STAT_LABELS`] order
    pub fn values(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.q50,
            self.q75,
            self.max,
        ]
    }
}

/// Linear interpolation between the closest ranks; `sorted` must be ascending.
pub fn percentile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let position = (sorted.len() - 1) as f64 * q;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Statistics for every numeric column of a table
#[derive(Debug, Clone, PartialEq)]
pub struct Description {
    pub columns: Vec<ColumnSummary>,
}

impl Description {
    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Pipe table: one row per statistic, one column per numeric column
    pub fn to_markdown(&self) -> String {
        let mut grid: Vec<Vec<String>> = Vec::with_capacity(STAT_LABELS.len() + 1);

        let mut header = vec![String::new()];
        header.extend(self.columns.iter().map(|c| c.name.clone()));
        grid.push(header);

        for (idx, label) in STAT_LABELS.iter().enumerate() {
            let mut row = vec![label.to_string()];
            row.extend(self.columns.iter().map(|c| format_number(c.values()[idx])));
            grid.push(row);
        }

        let widths: Vec<usize> = (0..grid[0].len())
            .map(|col| grid.iter().map(|row| row[col].chars().count()).max().unwrap_or(0))
            .collect();

        let mut out = String::new();
        for (row_idx, row) in grid.iter().enumerate() {
            out.push('|');
            for (col, cell) in row.iter().enumerate() {
                let padded = if col == 0 {
                    format!("{:<width$}", cell, width = widths[col])
                } else {
                    format!("{:>width$}", cell, width = widths[col])
                };
                out.push(' ');
                out.push_str(&padded);
                out.push_str(" |");
            }
            out.push('\n');

            if row_idx == 0 {
                out.push('|');
                for (col, width) in widths.iter().enumerate() {
                    let dashes = "-".repeat(*width);
                    if col == 0 {
                        out.push_str(&format!(":{}-|", dashes));
                    } else {
                        out.push_str(&format!("-{}:|", dashes));
                    }
                }
                out.push('\n');
            }
        }
        out.trim_end().to_string()
    }
}

/// Describes every numeric column of `table`.
///
/// # Errors
/// `AppError::NoNumericColumns` when the table has no numeric column.
pub fn describe(table: &Table) -> AppResult<Description> {
    let columns: Vec<ColumnSummary> = table
        .numeric_columns()
        .filter_map(|column| {
            column
                .numeric_values()
                .map(|values| ColumnSummary::from_values(&column.name, values))
        })
        .collect();

    if columns.is_empty() {
        return Err(AppError::NoNumericColumns);
    }
    Ok(Description { columns })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;
    use pretty_assertions::assert_eq;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_percentile_linear_interpolation() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_close(percentile(&sorted, 0.25), 1.75);
        assert_close(percentile(&sorted, 0.50), 2.5);
        assert_close(percentile(&sorted, 0.75), 3.25);
        assert_close(percentile(&[5.0], 0.75), 5.0);
        assert!(percentile(&[], 0.5).is_nan());
    }

    #[test]
    fn test_column_summary() {
        let summary = ColumnSummary::from_values("x", &[Some(4.0), None, Some(1.0), Some(3.0), Some(2.0)]);

        assert_eq!(summary.count, 4);
        assert_close(summary.mean, 2.5);
        assert_close(summary.std, 1.2909944487358056);
        assert_close(summary.min, 1.0);
        assert_close(summary.q25, 1.75);
        assert_close(summary.q50, 2.5);
        assert_close(summary.q75, 3.25);
        assert_close(summary.max, 4.0);
    }

    #[test]
    fn test_single_value_has_nan_std() {
        let summary = ColumnSummary::from_values("x", &[Some(7.0)]);
        assert_eq!(summary.count, 1);
        assert!(summary.std.is_nan());
        assert_close(summary.q75, 7.0);
    }

    #[test]
    fn test_all_missing_column() {
        let summary = ColumnSummary::from_values("x", &[None, None]);
        assert_eq!(summary.count, 0);
        assert!(summary.mean.is_nan());
        assert!(summary.min.is_nan());
    }

    #[test]
    fn test_describe_skips_text_columns() {
        let table = Table::from_rows(
            vec!["label".into(), "value".into()],
            vec![
                vec![Cell::Text("a".into()), Cell::Number(1.0)],
                vec![Cell::Text("b".into()), Cell::Number(3.0)],
            ],
        )
        .unwrap();

        let description = describe(&table).unwrap();
        assert_eq!(description.columns.len(), 1);
        assert_close(description.column("value").unwrap().mean, 2.0);
        assert!(description.column("label").is_none());
    }

    #[test]
    fn test_describe_without_numeric_columns() {
        let table = Table::from_rows(vec!["label".into()], vec![vec![Cell::Text("a".into())]]).unwrap();
        assert!(matches!(describe(&table), Err(AppError::NoNumericColumns)));
    }

    #[test]
    fn test_markdown_layout() {
        let description = Description {
            columns: vec![ColumnSummary::from_values("a", &[Some(1.0), Some(2.0), Some(3.0)])],
        };

        let expected = "\
|       |   a |
|:------|----:|
| count |   3 |
| mean  |   2 |
| std   |   1 |
| min   |   1 |
| 25%   | 1.5 |
| 50%   |   2 |
| 75%   | 2.5 |
| max   |   3 |";
        assert_eq!(description.to_markdown(), expected);
    }
}
