//! Discovery of binding files in a bindings directory.

use crate::error::{Result, ViewerError};
use std::path::{Path, PathBuf};

/// File extensions recognised as binding files (compared case-insensitively).
pub const BINDING_EXTENSIONS: [&str; 2] = ["binds", "xml"];

/// A binding file found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingFile {
    pub path: PathBuf,
    /// File name without extension, shown in file pickers.
    pub label: String,
}

impl BindingFile {
    pub fn new(path: PathBuf) -> Self {
        let label = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, label }
    }
}

/// Returns true if `path` has one of the [`BINDING_EXTENSIONS`].
pub fn is_binding_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            BINDING_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// The binding files of one directory, sorted by label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingLibrary {
    pub directory: PathBuf,
    pub files: Vec<BindingFile>,
}

impl BindingLibrary {
    /// List binding files directly inside `dir` (no recursion).
    pub fn scan(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(ViewerError::NotADirectory(dir.to_path_buf()));
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && is_binding_file(&path) {
                files.push(BindingFile::new(path));
            }
        }
        files.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.path.cmp(&b.path)));

        tracing::debug!(count = files.len(), dir = %dir.display(), "scanned bindings directory");
        Ok(Self {
            directory: dir.to_path_buf(),
            files,
        })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&BindingFile> {
        self.files.get(index)
    }

    /// Index of the file at `path`, if it belongs to this library.
    pub fn position(&self, path: &Path) -> Option<usize> {
        self.files.iter().position(|f| f.path == path)
    }
}
