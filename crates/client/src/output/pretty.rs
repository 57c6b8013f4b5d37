//! Pretty output formatting.
//!
//! Records are laid out as a grid. Columns come from the keys of the first
//! record; later records with other keys leave those cells blank.

use dynoql_core::attribute::DecodedRecord;
use serde_json::Value;

/// Cells wider than this are cut and end with an ellipsis.
pub const MAX_CELL_WIDTH: usize = 40;

/// Format records as a grid.
pub fn format_records(records: &[DecodedRecord]) -> String {
    let Some(first) = records.first() else {
        return "No records returned.".to_string();
    };

    let columns: Vec<&str> = first.keys().map(String::as_str).collect();
    let headers: Vec<String> = columns.iter().map(|c| truncate(&capitalize(c))).collect();
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|c| truncate(&cell(record.get(*c))))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .fold(header.chars().count(), usize::max)
        })
        .collect();

    let mut output = render_row(&headers, &widths);
    output.push('\n');
    output.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in &rows {
        output.push('\n');
        output.push_str(&render_row(row, &widths));
    }
    output
}

fn render_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

/// Strings print raw, everything else as compact JSON.
fn cell(value: Option<&Value>) -> String {
    match value {
        None => String::new(),
        Some(Value::String(s)) => s.replace('\n', " "),
        Some(other) => other.to_string(),
    }
}

fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_CELL_WIDTH {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(MAX_CELL_WIDTH - 1).collect();
    cut.push('…');
    cut
}
