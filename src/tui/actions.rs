use crossterm::event::{self, KeyCode, KeyModifiers};

use super::app::App;
use super::keymap::Action;
use crate::clipboard::ClipboardProvider;

/// Handle text editing operations on a buffer with UTF-8 aware cursor movement.
///
/// Returns true if the buffer contents changed.
fn handle_text_input(buffer: &mut String, cursor: &mut usize, key: event::KeyEvent) -> bool {
    match key.code {
        KeyCode::Left => {
            if *cursor > 0 {
                let mut new_pos = *cursor - 1;
                while new_pos > 0 && !buffer.is_char_boundary(new_pos) {
                    new_pos -= 1;
                }
                *cursor = new_pos;
            }
            false
        }
        KeyCode::Right => {
            if *cursor < buffer.len() {
                let mut new_pos = *cursor + 1;
                while new_pos < buffer.len() && !buffer.is_char_boundary(new_pos) {
                    new_pos += 1;
                }
                *cursor = new_pos;
            }
            false
        }
        KeyCode::Home => {
            *cursor = 0;
            false
        }
        KeyCode::End => {
            *cursor = buffer.len();
            false
        }
        KeyCode::Backspace | KeyCode::Char('h')
            if key.code == KeyCode::Backspace || key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            if *cursor == 0 {
                return false;
            }
            let mut del_start = *cursor - 1;
            while del_start > 0 && !buffer.is_char_boundary(del_start) {
                del_start -= 1;
            }
            buffer.drain(del_start..*cursor);
            *cursor = del_start;
            true
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if *cursor == 0 {
                return false;
            }
            buffer.drain(..*cursor);
            *cursor = 0;
            true
        }
        KeyCode::Delete => {
            if *cursor >= buffer.len() {
                return false;
            }
            let mut del_end = *cursor + 1;
            while del_end < buffer.len() && !buffer.is_char_boundary(del_end) {
                del_end += 1;
            }
            buffer.drain(*cursor..del_end);
            true
        }
        KeyCode::Char(c) if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT => {
            buffer.insert(*cursor, c);
            *cursor += c.len_utf8();
            true
        }
        _ => false,
    }
}

/// Result of applying an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyResult {
    Continue,
    Quit,
}

/// Apply an action to the application state.
///
/// Returns `ApplyResult::Quit` if the application should exit.
pub fn apply_action(
    app: &mut App,
    action: Action,
    clipboard: &mut dyn ClipboardProvider,
) -> ApplyResult {
    match action {
        Action::Move(delta) => app.move_cursor(delta),
        Action::Page(dir) => app.page(dir),
        Action::GotoFirst => app.goto_first(),
        Action::GotoLast => app.goto_last(),
        Action::NextFile => app.next_file(),
        Action::PrevFile => app.prev_file(),
        Action::Reload => app.reload(),
        Action::ToggleUnbound => app.toggle_unbound(),
        Action::Yank => app.copy_selected(clipboard),
        Action::ClearFilter | Action::CancelFilter => app.clear_filter(),
        Action::EnterFilter => app.enter_filter_mode(),
        Action::CommitFilter => app.commit_filter(),
        Action::EnterCommand => app.enter_command_mode(),
        Action::ExecuteCommand => {
            if app.execute_command() {
                return ApplyResult::Quit;
            }
        }
        Action::CancelCommand => app.cancel_command(),
        Action::OpenHelp => app.open_help_modal(),
        Action::Quit => return ApplyResult::Quit,
    }
    ApplyResult::Continue
}

/// Edit the filter; rows are re-projected on every change.
pub fn handle_filter_text(app: &mut App, key: event::KeyEvent) {
    if handle_text_input(&mut app.filter_buffer, &mut app.filter_cursor, key) {
        app.filter_changed();
    }
}

pub fn handle_command_text(app: &mut App, key: event::KeyEvent) {
    handle_text_input(&mut app.command_buffer, &mut app.command_cursor, key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::tui::app::Mode;
    use crossterm::event::KeyEvent;
    use edbv_core::{MappingEntry, MappingTable, Viewer};
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Custom.binds");
        std::fs::write(
            &path,
            r#"<Root>
                <LandingGearToggle><Primary Device="Keyboard" Key="L"/></LandingGearToggle>
                <YawLeftButton><Primary Device="{NoDevice}" Key=""/></YawLeftButton>
            </Root>"#,
        )
        .unwrap();
        let mappings = Arc::new(MappingTable::from_entries(vec![
            MappingEntry::new("LandingGearToggle", "Ship", "Flight", "Toggle Landing Gear"),
            MappingEntry::new("YawLeftButton", "Ship", "Flight Rotation", "Yaw Left"),
        ]));
        let mut viewer = Viewer::new(mappings);
        viewer.load_file(&path).unwrap();
        (dir, App::new(viewer))
    }

    #[test]
    fn text_input_is_utf8_aware() {
        let mut buffer = String::from("gé");
        let mut cursor = buffer.len();
        assert!(handle_text_input(&mut buffer, &mut cursor, key(KeyCode::Backspace)));
        assert_eq!(buffer, "g");
        assert_eq!(cursor, 1);
        assert!(!handle_text_input(&mut buffer, &mut cursor, key(KeyCode::Left)));
        assert!(handle_text_input(&mut buffer, &mut cursor, key(KeyCode::Char('ü'))));
        assert_eq!(buffer, "üg");
        assert_eq!(cursor, 'ü'.len_utf8());
    }

    #[test]
    fn typing_in_filter_mode_reprojects() {
        let (_dir, mut app) = app();
        let mut clipboard = MemoryClipboard::default();
        apply_action(&mut app, Action::EnterFilter, &mut clipboard);
        assert_eq!(app.mode, Mode::Filter);

        for c in "yaw".chars() {
            handle_filter_text(&mut app, key(KeyCode::Char(c)));
        }
        assert_eq!(app.rows().len(), 1);
        assert_eq!(app.rows()[0].action, "Yaw Left");

        apply_action(&mut app, Action::CommitFilter, &mut clipboard);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.viewer.view().filter, "yaw");
    }

    #[test]
    fn escape_in_filter_mode_clears() {
        let (_dir, mut app) = app();
        let mut clipboard = MemoryClipboard::default();
        apply_action(&mut app, Action::EnterFilter, &mut clipboard);
        handle_filter_text(&mut app, key(KeyCode::Char('x')));
        assert!(app.rows().is_empty());
        apply_action(&mut app, Action::CancelFilter, &mut clipboard);
        assert_eq!(app.rows().len(), 2);
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn yank_uses_clipboard() {
        let (_dir, mut app) = app();
        let mut clipboard = MemoryClipboard::default();
        apply_action(&mut app, Action::GotoLast, &mut clipboard);
        apply_action(&mut app, Action::Yank, &mut clipboard);
        assert_eq!(
            clipboard.text.as_deref(),
            Some("Ship\tFlight Rotation\tYaw Left\t{NoDevice} - \t{NoDevice} - ")
        );
    }

    #[test]
    fn command_quit_and_quit_key() {
        let (_dir, mut app) = app();
        let mut clipboard = MemoryClipboard::default();
        assert_eq!(
            apply_action(&mut app, Action::Quit, &mut clipboard),
            ApplyResult::Quit
        );

        apply_action(&mut app, Action::EnterCommand, &mut clipboard);
        for c in "q".chars() {
            handle_command_text(&mut app, key(KeyCode::Char(c)));
        }
        assert_eq!(
            apply_action(&mut app, Action::ExecuteCommand, &mut clipboard),
            ApplyResult::Quit
        );
    }
}
