//! UI-specific state (windows, focus, window level).

#[derive(Debug, Default)]
pub struct GuiState {
    /// Window stays above other windows.
    pub keep_on_top: bool,
    /// `keep_on_top` changed and must be sent to the viewport.
    pub window_level_dirty: bool,

    pub show_help: bool,
    pub show_about: bool,
    pub show_dir_window: bool,
    /// Text entry of the Set Bindings Directory window.
    pub dir_input: String,
    pub update_dismissed: bool,

    /// Focus the search box this frame.
    pub request_focus_search: bool,
    /// Scroll the table so the selected row is visible this frame.
    pub scroll_to_selected: bool,
}

impl GuiState {
    pub fn new(keep_on_top: bool) -> Self {
        Self {
            keep_on_top,
            ..Self::default()
        }
    }
}
