//! Table/CSV rendering and number formatting for the derived series.

use std::path::Path;

use clap::ValueEnum;

use crate::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Table,
    Json,
    Csv,
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// Write to the given path, or stdout when no path is set.
pub fn emit(content: &str, output: Option<&Path>) -> Result<(), CliError> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))?;
            eprintln!("wrote {}", path.display());
            Ok(())
        }
        None => {
            println!("{}", content.trim_end_matches('\n'));
            Ok(())
        }
    }
}

pub fn to_json_pretty<T: serde::Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CliError::runtime(format!("JSON serialization error: {e}")))
}

// ---------------------------------------------------------------------------
// Grid rendering
// ---------------------------------------------------------------------------

pub fn render_csv(headers: &[String], rows: &[Vec<String>]) -> Result<String, CliError> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer
        .write_record(headers)
        .map_err(|e| CliError::io(e.to_string()))?;
    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| CliError::io(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| CliError::io(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CliError::io(e.to_string()))
}

/// Fixed-width table: first column left-aligned, the rest right-aligned.
pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let columns = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(columns) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    render_row(&mut out, headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    render_row(&mut out, &rule, &widths);
    for row in rows {
        render_row(&mut out, row, &widths);
    }
    out
}

fn render_row(out: &mut String, cells: &[String], widths: &[usize]) {
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        let pad = width.saturating_sub(cell.chars().count());
        if i == 0 {
            out.push_str(cell);
            out.push_str(&" ".repeat(pad));
        } else {
            out.push_str(&" ".repeat(pad));
            out.push_str(cell);
        }
    }
    // Trailing spaces from a short last column are not worth keeping.
    while out.ends_with(' ') {
        out.pop();
    }
    out.push('\n');
}

// ---------------------------------------------------------------------------
// Number formatting
// ---------------------------------------------------------------------------

/// Currency amount: thousands separators, 2 decimals, R prefix.
pub fn format_amount(value: f64) -> String {
    if value < 0.0 {
        format!("-R{}", group_thousands(-value, 2))
    } else {
        format!("R{}", group_thousands(value, 2))
    }
}

/// Volume in m³: thousands separators, 2 decimals.
pub fn format_volume(value: f64) -> String {
    group_thousands(value, 2)
}

pub fn format_margin(margin: Option<f64>) -> String {
    match margin {
        Some(pct) => format!("{pct:.2}%"),
        None => "n/a".into(),
    }
}

fn group_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::new();
    let digits: Vec<char> = integer.chars().collect();
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }

    let mut out = String::new();
    if value < 0.0 {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_groups_thousands() {
        assert_eq!(format_amount(140_632_837.0), "R140,632,837.00");
        assert_eq!(format_amount(17_603_090.5), "R17,603,090.50");
        assert_eq!(format_amount(0.0), "R0.00");
        assert_eq!(format_amount(-48_787_274.0), "-R48,787,274.00");
    }

    #[test]
    fn volume_keeps_two_decimals() {
        assert_eq!(format_volume(583_145.86), "583,145.86");
        assert_eq!(format_volume(999.0), "999.00");
    }

    #[test]
    fn margin_placeholder_for_undefined() {
        assert_eq!(format_margin(Some(67.05)), "67.05%");
        assert_eq!(format_margin(Some(-53.12)), "-53.12%");
        assert_eq!(format_margin(None), "n/a");
    }

    #[test]
    fn csv_round_trips_headers_and_rows() {
        let headers = vec!["month".to_string(), "total".to_string()];
        let rows = vec![
            vec!["1".to_string(), "160424.79".to_string()],
            vec!["2".to_string(), "160424.79".to_string()],
        ];
        let csv = render_csv(&headers, &rows).unwrap();
        assert_eq!(csv, "month,total\n1,160424.79\n2,160424.79\n");
    }

    #[test]
    fn table_aligns_columns() {
        let headers = vec!["Name".to_string(), "Revenue".to_string()];
        let rows = vec![
            vec!["Inframat".to_string(), "379,044,809.00".to_string()],
            vec!["Bulkmat".to_string(), "348,305,960.00".to_string()],
        ];
        let table = render_table(&headers, &rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Name"));
        assert!(lines[1].starts_with("----"));
        // Right-aligned numeric column: both data lines end at the same width.
        assert_eq!(lines[2].len(), lines[3].len());
        assert!(lines[2].ends_with("379,044,809.00"));
    }
}
