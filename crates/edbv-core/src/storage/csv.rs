//! CSV export of display rows

use crate::error::Result;
use crate::view::{COLUMN_HEADERS, DisplayRow};
use std::path::Path;

/// Write rows to a CSV file with a header line.
pub fn write_csv(path: &Path, rows: &[DisplayRow]) -> Result<()> {
    std::fs::write(path, write_csv_content(rows))?;
    Ok(())
}

/// Render rows as CSV text.
pub fn write_csv_content(rows: &[DisplayRow]) -> String {
    let mut out = String::new();
    push_line(&mut out, COLUMN_HEADERS);
    for row in rows {
        push_line(&mut out, row.columns());
    }
    out
}

fn push_line(out: &mut String, fields: [&str; 5]) {
    let line: Vec<String> = fields.iter().map(|f| escape_csv_field(f)).collect();
    out.push_str(&line.join(","));
    out.push('\n');
}

fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
