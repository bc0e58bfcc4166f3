//! Error types for edbv core.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or viewing bindings
#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at byte {position}: {message}")]
    Parse { position: u64, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("No binding file at index {index} ({count} available)")]
    FileIndexOutOfRange { index: usize, count: usize },

    #[error("No binding file selected")]
    NoFileSelected,
}

pub type Result<T> = std::result::Result<T, ViewerError>;
