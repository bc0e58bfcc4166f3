//! Storage: the last-directory marker and CSV/Markdown export of display rows.

mod csv;
mod last_dir;
mod md;

pub use csv::{write_csv, write_csv_content};
pub use last_dir::{read_last_directory, write_last_directory};
pub use md::{write_markdown, write_markdown_content};

use crate::error::Result;
use crate::view::DisplayRow;
use std::path::Path;

/// Export rows, choosing Markdown for `.md`/`.markdown` and CSV otherwise.
pub fn export_rows(path: &Path, rows: &[DisplayRow]) -> Result<()> {
    let is_markdown = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"));
    if is_markdown {
        write_markdown(path, rows)
    } else {
        write_csv(path, rows)
    }
}
