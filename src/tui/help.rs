//! Help text content for the help modal

/// Get keybinding help text
pub fn get_help_text() -> Vec<String> {
    vec![
        "Navigation:",
        "  j/k, arrows  Move down/up",
        "  PageUp/Down  Scroll by page",
        "  g / Home     First row",
        "  G / End      Last row",
        "",
        "Binding files:",
        "  Tab          Next file in the directory",
        "  Shift+Tab    Previous file",
        "  r            Reload the current file",
        "",
        "Filtering:",
        "  /            Edit filter (Enter keeps, Esc clears)",
        "  c            Clear filter",
        "  u            Toggle Show Unbound",
        "",
        "Other:",
        "  y            Copy selected row",
        "  :            Enter command mode",
        "  ?            This help",
        "  q            Quit",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// Get command help text
pub fn get_commands_help() -> Vec<String> {
    vec![
        "Commands",
        "",
        "  :dir <path>      Set bindings directory (remembered)",
        "  :open <file>     Open a binding file",
        "  :export <file>   Export rows (.csv or .md)",
        "  :reload          Reload the current file",
        "  :next / :prev    Switch binding file",
        "  :unbound         Toggle Show Unbound",
        "  :clear           Clear filter",
        "  :help            This help",
        "  :q               Quit",
        "",
        "Press Esc or q to close",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// Get about text
pub fn get_about_help() -> Vec<String> {
    vec![
        "How to Use".to_string(),
        "  Point edbv at the folder holding your .binds files (:dir).".to_string(),
        "  Type / and a few letters to filter by action, area or category.".to_string(),
        "  Show Unbound highlights controls with no device assigned.".to_string(),
        String::new(),
        format!("About edbv {}", env!("CARGO_PKG_VERSION")),
        "  A searchable table of Elite Dangerous control bindings.".to_string(),
    ]
}
