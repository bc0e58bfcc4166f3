//! Action types and dispatch logic.
//!
//! Menus, widgets and keyboard shortcuts all produce [`Action`]s; the
//! apply_action function dispatches them to update the app state.

use crate::gui::app::GuiApp;
use crate::gui::state::GuiState;
use std::path::PathBuf;

/// All possible user actions in the GUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Search text was edited.
    SearchChanged,
    ClearSearch,
    FocusSearch,

    /// Move the row selection by this many rows.
    MoveSelection(isize),
    SelectRow(usize),
    /// Copy the selected row to the clipboard.
    CopySelected,

    SelectFile(usize),
    OpenDirectoryWindow,
    SetDirectory(PathBuf),

    SetShowUnbound(bool),
    ToggleUnbound,
    SetKeepOnTop(bool),

    ShowHelp,
    ShowAbout,
    DismissUpdate,
    Close,
}

/// Apply an action to update app and state.
///
/// Clipboard access and viewport commands are handled by the caller.
pub fn apply_action(app: &mut GuiApp, state: &mut GuiState, action: Action) {
    match action {
        Action::SearchChanged => app.sync_search(),
        Action::ClearSearch => app.clear_search(),
        Action::FocusSearch => state.request_focus_search = true,

        Action::MoveSelection(delta) => {
            app.move_selection(delta);
            state.scroll_to_selected = true;
        }
        Action::SelectRow(index) => app.select_row(index),
        Action::CopySelected => {}

        Action::SelectFile(index) => app.select_file(index),
        Action::OpenDirectoryWindow => {
            state.dir_input = app
                .viewer
                .directory()
                .map(|d| d.display().to_string())
                .unwrap_or_default();
            state.show_dir_window = true;
        }
        Action::SetDirectory(dir) => {
            app.set_directory(&dir);
            state.show_dir_window = false;
        }

        Action::SetShowUnbound(show) => app.set_show_unbound(show),
        Action::ToggleUnbound => app.toggle_unbound(),
        Action::SetKeepOnTop(on) => {
            state.keep_on_top = on;
            state.window_level_dirty = true;
        }

        Action::ShowHelp => state.show_help = true,
        Action::ShowAbout => state.show_about = true,
        Action::DismissUpdate => state.update_dismissed = true,
        Action::Close => {}
    }
}
