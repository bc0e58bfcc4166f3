//! Application state and logic.
//!
//! [`App`] wraps the core [`Viewer`] with the terminal-only state: the row
//! cursor and viewport, the filter and command buffers, the status line and
//! the help modal. Like Vim it runs in [`Mode`]s.

use crate::clipboard::ClipboardProvider;
use crate::startup::{self, Startup};
use crate::update::UpdateNotice;
use edbv_core::storage::export_rows;
use edbv_core::{DisplayRow, Viewer};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, TryRecvError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Move through the table and run single-key commands.
    Normal,
    /// Edit the filter text (`/` prompt). Rows update on every keystroke.
    Filter,
    /// Enter ex-style commands (`:dir`, `:export`, `:q`, ...).
    Command,
}

pub struct App {
    pub viewer: Viewer,
    pub mode: Mode,
    /// Index of the selected row in `viewer.rows()`.
    pub cursor_row: usize,
    /// First row drawn in the table.
    pub viewport_row: usize,
    /// Number of table rows that fit on screen.
    pub visible_rows: usize,
    pub filter_buffer: String,
    /// Cursor position within filter buffer (byte offset)
    pub filter_cursor: usize,
    pub command_buffer: String,
    /// Cursor position within command buffer (byte offset)
    pub command_cursor: usize,
    pub status_message: String,
    pub help_modal: bool,
    pub help_scroll: usize,
    /// Where `:dir` remembers the directory. `None` disables persistence.
    pub last_dir_marker: Option<PathBuf>,
    pub update_rx: Option<Receiver<UpdateNotice>>,
    pub update_notice: Option<UpdateNotice>,
}

impl App {
    pub fn new(viewer: Viewer) -> Self {
        let filter_buffer = viewer.view().filter.clone();
        App {
            viewer,
            mode: Mode::Normal,
            cursor_row: 0,
            viewport_row: 0,
            visible_rows: 20,
            filter_cursor: filter_buffer.len(),
            filter_buffer,
            command_buffer: String::new(),
            command_cursor: 0,
            status_message: String::new(),
            help_modal: false,
            help_scroll: 0,
            last_dir_marker: None,
            update_rx: None,
            update_notice: None,
        }
    }

    pub fn from_startup(startup: Startup, update_rx: Option<Receiver<UpdateNotice>>) -> Self {
        let mut app = App::new(startup.viewer);
        app.status_message = startup.status;
        app.last_dir_marker = startup.last_dir_marker;
        app.update_rx = update_rx;
        app
    }

    pub fn rows(&self) -> &[DisplayRow] {
        self.viewer.rows()
    }

    pub fn selected_row(&self) -> Option<&DisplayRow> {
        self.viewer.rows().get(self.cursor_row)
    }

    pub fn move_cursor(&mut self, delta: i32) {
        let len = self.rows().len();
        if len == 0 {
            self.cursor_row = 0;
        } else if delta < 0 {
            self.cursor_row = self.cursor_row.saturating_sub(delta.unsigned_abs() as usize);
        } else {
            self.cursor_row = (self.cursor_row + delta as usize).min(len - 1);
        }
        self.update_viewport();
    }

    pub fn page(&mut self, dir: i32) {
        self.move_cursor(self.visible_rows.max(1) as i32 * dir);
    }

    pub fn goto_first(&mut self) {
        self.cursor_row = 0;
        self.update_viewport();
    }

    pub fn goto_last(&mut self) {
        self.cursor_row = self.rows().len().saturating_sub(1);
        self.update_viewport();
    }

    /// Keep the cursor inside the rows and on screen.
    pub fn update_viewport(&mut self) {
        let len = self.rows().len();
        if self.cursor_row >= len {
            self.cursor_row = len.saturating_sub(1);
        }
        let visible = self.visible_rows.max(1);
        if self.cursor_row < self.viewport_row {
            self.viewport_row = self.cursor_row;
        } else if self.cursor_row >= self.viewport_row + visible {
            self.viewport_row = self.cursor_row + 1 - visible;
        }
        if self.viewport_row + visible > len {
            self.viewport_row = len.saturating_sub(visible);
        }
    }

    fn rows_changed(&mut self) {
        self.cursor_row = 0;
        self.viewport_row = 0;
        self.update_viewport();
    }

    pub fn enter_filter_mode(&mut self) {
        self.mode = Mode::Filter;
        self.filter_buffer = self.viewer.view().filter.clone();
        self.filter_cursor = self.filter_buffer.len();
    }

    /// Re-project after the filter buffer was edited.
    pub fn filter_changed(&mut self) {
        self.viewer.set_filter(&self.filter_buffer);
        self.rows_changed();
    }

    pub fn commit_filter(&mut self) {
        self.mode = Mode::Normal;
        self.filter_changed();
        self.status_message = format!("{} matching controls", self.rows().len());
    }

    pub fn clear_filter(&mut self) {
        self.mode = Mode::Normal;
        self.filter_buffer.clear();
        self.filter_cursor = 0;
        self.filter_changed();
        self.status_message = "Filter cleared".to_string();
    }

    pub fn enter_command_mode(&mut self) {
        self.mode = Mode::Command;
        self.command_buffer.clear();
        self.command_cursor = 0;
    }

    pub fn cancel_command(&mut self) {
        self.mode = Mode::Normal;
        self.command_buffer.clear();
        self.command_cursor = 0;
    }

    pub fn toggle_unbound(&mut self) {
        let on = self.viewer.toggle_highlight_unbound();
        self.status_message = format!("Show Unbound: {}", if on { "on" } else { "off" });
    }

    pub fn copy_selected(&mut self, clipboard: &mut dyn ClipboardProvider) {
        let Some(text) = self.selected_row().map(DisplayRow::to_tsv) else {
            self.status_message = "Nothing to copy".to_string();
            return;
        };
        self.status_message = if clipboard.set_text(text) {
            "Copied row to clipboard".to_string()
        } else {
            "Error: clipboard unavailable".to_string()
        };
    }

    fn loaded_message(&self) -> String {
        let label = self.viewer.current_label().unwrap_or_default();
        format!(
            "Loaded {}: {} of {} controls shown",
            label,
            self.rows().len(),
            self.viewer.raw_count()
        )
    }

    fn after_load(&mut self, result: edbv_core::Result<usize>) {
        match result {
            Ok(_) => {
                self.rows_changed();
                self.status_message = self.loaded_message();
            }
            Err(e) => self.status_message = format!("Error: {}", e),
        }
    }

    pub fn next_file(&mut self) {
        let result = self.viewer.select_next_file();
        self.after_load(result);
    }

    pub fn prev_file(&mut self) {
        let result = self.viewer.select_prev_file();
        self.after_load(result);
    }

    pub fn reload(&mut self) {
        let result = self.viewer.reload();
        self.after_load(result);
    }

    pub fn open_file(&mut self, path: &Path) {
        let result = self.viewer.load_file(path);
        self.after_load(result);
    }

    /// Switch to `dir` and remember it for the next start.
    pub fn open_directory(&mut self, dir: &Path) {
        match self.viewer.open_directory(dir) {
            Ok(count) => {
                self.rows_changed();
                self.status_message = if count == 0 {
                    format!("No binding files in {}", dir.display())
                } else {
                    format!("Current Bindings Directory: {}", dir.display())
                };
                if let Err(e) = startup::remember_directory(self.last_dir_marker.as_deref(), dir) {
                    tracing::warn!("could not remember bindings directory: {}", e);
                    self.status_message = format!("Error: could not remember directory: {}", e);
                }
            }
            Err(e) => {
                // A broken first file still switches the library.
                self.rows_changed();
                self.status_message = format!("Error: {}", e);
            }
        }
    }

    pub fn export(&mut self, path: &Path) {
        self.status_message = match export_rows(path, self.rows()) {
            Ok(()) => format!("Exported {} rows to {}", self.rows().len(), path.display()),
            Err(e) => format!("Error: {}", e),
        };
    }

    pub fn open_help_modal(&mut self) {
        self.help_modal = true;
        self.help_scroll = 0;
    }

    pub fn close_help_modal(&mut self) {
        self.help_modal = false;
    }

    pub fn scroll_help_by(&mut self, delta: i32) {
        if delta < 0 {
            self.help_scroll = self.help_scroll.saturating_sub(delta.unsigned_abs() as usize);
        } else {
            self.help_scroll = self.help_scroll.saturating_add(delta as usize);
        }
    }

    /// Pick up a finished update check without blocking.
    pub fn poll_update(&mut self) {
        let Some(rx) = &self.update_rx else {
            return;
        };
        match rx.try_recv() {
            Ok(notice) => {
                self.status_message = notice.message();
                self.update_notice = Some(notice);
                self.update_rx = None;
            }
            Err(TryRecvError::Disconnected) => self.update_rx = None,
            Err(TryRecvError::Empty) => {}
        }
    }

    /// Execute the command buffer. Returns true if the app should quit.
    pub fn execute_command(&mut self) -> bool {
        let cmd = self.command_buffer.trim().to_string();
        self.cancel_command();

        let (command, args) = match cmd.split_once(' ') {
            Some((command, args)) => (command, Some(args.trim()).filter(|a| !a.is_empty())),
            None => (cmd.as_str(), None),
        };

        match command {
            "" => {}
            "q" | "quit" | "q!" => return true,
            "dir" | "cd" => match args {
                Some(path) => self.open_directory(&PathBuf::from(path)),
                None => {
                    self.status_message = match self.viewer.directory() {
                        Some(dir) => format!("Current Bindings Directory: {}", dir.display()),
                        None => "Usage: :dir <path>".to_string(),
                    }
                }
            },
            "e" | "open" => match args {
                Some(path) => self.open_file(&PathBuf::from(path)),
                None => self.status_message = "Usage: :open <file.binds>".to_string(),
            },
            "export" | "w" => match args {
                Some(path) => self.export(&PathBuf::from(path)),
                None => self.status_message = "Usage: :export <file.csv|file.md>".to_string(),
            },
            "reload" | "r" => self.reload(),
            "unbound" | "u" => self.toggle_unbound(),
            "clear" | "c" => self.clear_filter(),
            "next" | "n" => self.next_file(),
            "prev" | "N" => self.prev_file(),
            "help" | "h" => self.open_help_modal(),
            _ => {
                self.status_message = format!("Unknown command: {}", command);
            }
        }
        false
    }
}
