//! Viewer session state (UI-agnostic).
//!
//! Owns the shared mapping table, the current binding library and bindings,
//! and the view state. Projected rows are cached and only recomputed when one
//! of their inputs changes.

use crate::bindings::{RawBinding, parse_bindings};
use crate::error::{Result, ViewerError};
use crate::library::{BindingFile, BindingLibrary};
use crate::mapping::MappingTable;
use crate::view::{DisplayRow, ViewState};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct Viewer {
    mappings: Arc<MappingTable>,
    library: BindingLibrary,
    /// Index into the library of the loaded file, if it came from the library.
    selected: Option<usize>,
    /// Path of the loaded binding file.
    loaded_path: Option<PathBuf>,
    bindings: Vec<RawBinding>,
    view: ViewState,
    rows: Vec<DisplayRow>,
}

impl Viewer {
    /// Create an empty viewer. Side-effect free.
    pub fn new(mappings: Arc<MappingTable>) -> Self {
        Self {
            mappings,
            library: BindingLibrary::default(),
            selected: None,
            loaded_path: None,
            bindings: Vec::new(),
            view: ViewState::default(),
            rows: Vec::new(),
        }
    }

    pub fn mappings(&self) -> &MappingTable {
        &self.mappings
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    pub fn bindings(&self) -> &[RawBinding] {
        &self.bindings
    }

    /// Number of controls in the loaded file, before mapping and filtering.
    pub fn raw_count(&self) -> usize {
        self.bindings.len()
    }

    pub fn files(&self) -> &[BindingFile] {
        &self.library.files
    }

    pub fn directory(&self) -> Option<&Path> {
        if self.library.directory.as_os_str().is_empty() {
            None
        } else {
            Some(&self.library.directory)
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn loaded_path(&self) -> Option<&Path> {
        self.loaded_path.as_deref()
    }

    /// Label of the loaded file (file stem), for titles and status lines.
    pub fn current_label(&self) -> Option<String> {
        if let Some(file) = self.selected.and_then(|i| self.library.get(i)) {
            return Some(file.label.clone());
        }
        self.loaded_path
            .as_deref()
            .map(|p| BindingFile::new(p.to_path_buf()).label)
    }

    /// Scan `dir` and load its first binding file, if any.
    ///
    /// Returns the number of binding files found. If the directory cannot be
    /// scanned nothing changes; if the first file fails to parse the library
    /// is still switched but the previous bindings stay on screen.
    pub fn open_directory(&mut self, dir: &Path) -> Result<usize> {
        let library = BindingLibrary::scan(dir)?;
        let count = library.len();
        self.library = library;
        self.selected = None;
        tracing::info!(count, dir = %dir.display(), "opened bindings directory");

        if count > 0 {
            self.select_file(0)?;
        }
        Ok(count)
    }

    /// Load the library file at `index`.
    pub fn select_file(&mut self, index: usize) -> Result<usize> {
        let path = self
            .library
            .get(index)
            .map(|f| f.path.clone())
            .ok_or(ViewerError::FileIndexOutOfRange {
                index,
                count: self.library.len(),
            })?;
        let count = self.load_file(&path)?;
        self.selected = Some(index);
        Ok(count)
    }

    /// Select the next library file, wrapping around.
    pub fn select_next_file(&mut self) -> Result<usize> {
        let count = self.library.len();
        if count == 0 {
            return Err(ViewerError::NoFileSelected);
        }
        let next = self.selected.map(|i| (i + 1) % count).unwrap_or(0);
        self.select_file(next)
    }

    /// Select the previous library file, wrapping around.
    pub fn select_prev_file(&mut self) -> Result<usize> {
        let count = self.library.len();
        if count == 0 {
            return Err(ViewerError::NoFileSelected);
        }
        let prev = self
            .selected
            .map(|i| (i + count - 1) % count)
            .unwrap_or(count - 1);
        self.select_file(prev)
    }

    /// Parse `path` and replace the loaded bindings.
    ///
    /// On failure the previously loaded bindings and rows are kept.
    /// Returns the number of parsed controls.
    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        let bindings = match parse_bindings(path) {
            Ok(bindings) => bindings,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "failed to load binding file");
                return Err(err);
            }
        };
        let count = bindings.len();
        self.bindings = bindings;
        self.loaded_path = Some(path.to_path_buf());
        self.selected = self.library.position(path);
        self.refresh();
        tracing::info!(count, rows = self.rows.len(), path = %path.display(), "loaded binding file");
        Ok(count)
    }

    /// Re-read the loaded file from disk.
    pub fn reload(&mut self) -> Result<usize> {
        let path = self.loaded_path.clone().ok_or(ViewerError::NoFileSelected)?;
        self.load_file(&path)
    }

    pub fn set_filter(&mut self, filter: &str) {
        if self.view.filter != filter {
            self.view.filter = filter.to_string();
            self.refresh();
        }
    }

    pub fn clear_filter(&mut self) {
        self.set_filter("");
    }

    pub fn set_highlight_unbound(&mut self, highlight: bool) {
        if self.view.highlight_unbound != highlight {
            self.view.highlight_unbound = highlight;
            self.refresh();
        }
    }

    pub fn toggle_highlight_unbound(&mut self) -> bool {
        self.set_highlight_unbound(!self.view.highlight_unbound);
        self.view.highlight_unbound
    }

    fn refresh(&mut self) {
        self.rows = self.view.project(&self.bindings, &self.mappings);
    }
}
