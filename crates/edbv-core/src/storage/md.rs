//! Markdown export functionality

use crate::error::Result;
use crate::view::{COLUMN_HEADERS, DisplayRow};
use std::path::Path;

/// Write rows to a markdown file
pub fn write_markdown(path: &Path, rows: &[DisplayRow]) -> Result<()> {
    std::fs::write(path, write_markdown_content(rows))?;
    Ok(())
}

/// Render rows as a markdown table. Highlighted rows have a bold action.
pub fn write_markdown_content(rows: &[DisplayRow]) -> String {
    let mut out = String::from("# Bindings\n\n");

    if rows.is_empty() {
        out.push_str("*No bindings to display*\n");
        return out;
    }

    out.push_str(&format!("| {} |\n", COLUMN_HEADERS.join(" | ")));
    out.push_str(&format!("|{}\n", "---|".repeat(COLUMN_HEADERS.len())));

    for row in rows {
        let cells: Vec<String> = row
            .columns()
            .iter()
            .enumerate()
            .map(|(idx, value)| {
                let escaped = escape_markdown(value);
                // Action column
                if idx == 2 && row.highlight && !escaped.is_empty() {
                    format!("**{}**", escaped)
                } else {
                    escaped
                }
            })
            .collect();
        out.push_str(&format!("| {} |\n", cells.join(" | ")));
    }

    out
}

/// Escape special markdown characters in cell content
fn escape_markdown(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ").replace('\r', "")
}
