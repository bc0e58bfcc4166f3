//! Core application state and behaviour (UI-agnostic).

use crate::startup::{self, Startup};
use crate::update::UpdateNotice;
use edbv_core::{DisplayRow, Viewer};
use std::path::Path;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, TryRecvError};

/// Viewer session plus the GUI's selection, search text and status line.
/// Independent of egui so it can be tested in isolation.
pub struct GuiApp {
    pub viewer: Viewer,
    /// Index into `viewer.rows()`.
    pub selected_row: Option<usize>,
    /// Contents of the search box.
    pub search_text: String,
    pub status: String,
    pub last_dir_marker: Option<PathBuf>,
    pub update_notice: Option<UpdateNotice>,
    update_rx: Option<Receiver<UpdateNotice>>,
}

impl GuiApp {
    pub fn new(viewer: Viewer) -> Self {
        let search_text = viewer.view().filter.clone();
        Self {
            viewer,
            selected_row: None,
            search_text,
            status: String::new(),
            last_dir_marker: None,
            update_notice: None,
            update_rx: None,
        }
    }

    pub fn from_startup(startup: Startup, update_rx: Option<Receiver<UpdateNotice>>) -> Self {
        let mut app = Self::new(startup.viewer);
        app.status = startup.status;
        app.last_dir_marker = startup.last_dir_marker;
        app.update_rx = update_rx;
        app
    }

    pub fn rows(&self) -> &[DisplayRow] {
        self.viewer.rows()
    }

    pub fn selected(&self) -> Option<&DisplayRow> {
        self.selected_row.and_then(|i| self.viewer.rows().get(i))
    }

    pub fn update_pending(&self) -> bool {
        self.update_rx.is_some()
    }

    /// Apply the search box to the view.
    pub fn sync_search(&mut self) {
        self.viewer.set_filter(&self.search_text);
        self.selected_row = None;
    }

    pub fn clear_search(&mut self) {
        self.search_text.clear();
        self.sync_search();
    }

    pub fn set_show_unbound(&mut self, show: bool) {
        self.viewer.set_highlight_unbound(show);
        self.status = format!("Show Unbound: {}", if show { "on" } else { "off" });
    }

    pub fn toggle_unbound(&mut self) {
        let show = !self.viewer.view().highlight_unbound;
        self.set_show_unbound(show);
    }

    pub fn select_row(&mut self, index: usize) {
        if index < self.rows().len() {
            self.selected_row = Some(index);
        }
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = self.rows().len();
        if len == 0 {
            self.selected_row = None;
            return;
        }
        let current = self.selected_row.map(|i| i as isize).unwrap_or(-1);
        let next = (current + delta).clamp(0, len as isize - 1);
        self.selected_row = Some(next as usize);
    }

    pub fn select_file(&mut self, index: usize) {
        match self.viewer.select_file(index) {
            Ok(_) => {
                self.selected_row = None;
                let label = self.viewer.current_label().unwrap_or_default();
                self.status = format!("Loaded {} ({} controls)", label, self.viewer.raw_count());
            }
            Err(e) => self.status = format!("✗ {}", e),
        }
    }

    /// Switch to `dir` and remember it for the next start.
    pub fn set_directory(&mut self, dir: &Path) {
        match self.viewer.open_directory(dir) {
            Ok(count) => {
                self.selected_row = None;
                self.status = if count == 0 {
                    format!("No binding files in {}", dir.display())
                } else {
                    format!("Current Bindings Directory: {}", dir.display())
                };
                if let Err(e) = startup::remember_directory(self.last_dir_marker.as_deref(), dir) {
                    tracing::warn!("could not remember bindings directory: {}", e);
                    self.status = format!("✗ Could not remember directory: {}", e);
                }
            }
            Err(e) => {
                self.selected_row = None;
                self.status = format!("✗ {}", e);
            }
        }
    }

    /// Text copied for the selected row, if any.
    pub fn selected_text(&self) -> Option<String> {
        self.selected().map(DisplayRow::to_tsv)
    }

    /// Pick up a finished update check without blocking.
    pub fn poll_update(&mut self) {
        let Some(rx) = &self.update_rx else {
            return;
        };
        match rx.try_recv() {
            Ok(notice) => {
                self.update_notice = Some(notice);
                self.update_rx = None;
            }
            Err(TryRecvError::Disconnected) => self.update_rx = None,
            Err(TryRecvError::Empty) => {}
        }
    }
}
