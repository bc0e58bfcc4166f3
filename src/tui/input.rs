use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::prelude::*;
use std::io;
use std::time::Duration;

use super::actions::{ApplyResult, apply_action, handle_command_text, handle_filter_text};
use super::app::{App, Mode};
use super::keymap::translate;
use super::ui;
use crate::clipboard::ClipboardProvider;

/// How often the loop wakes up to poll the update check.
const TICK: Duration = Duration::from_millis(250);

fn handle_mouse_event(app: &mut App, terminal_area: Rect, mouse: MouseEvent) {
    if app.help_modal || app.mode != Mode::Normal {
        return;
    }
    match mouse.kind {
        MouseEventKind::ScrollDown => app.move_cursor(3),
        MouseEventKind::ScrollUp => app.move_cursor(-3),
        MouseEventKind::Down(MouseButton::Left) => {
            let [_header, _filter, table_area, _status] = ui::split_main_chunks(terminal_area);
            if let Some(row) = ui::table_row_at(app, table_area, mouse.column, mouse.row) {
                app.cursor_row = row;
                app.update_viewport();
            }
        }
        _ => {}
    }
}

fn handle_help_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => app.close_help_modal(),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_help_by(1),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_help_by(-1),
        KeyCode::PageDown => app.scroll_help_by(12),
        KeyCode::PageUp => app.scroll_help_by(-12),
        KeyCode::Home | KeyCode::Char('g') => app.help_scroll = 0,
        _ => {}
    }
}

pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    clipboard: &mut dyn ClipboardProvider,
) -> io::Result<()> {
    loop {
        app.poll_update();
        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(TICK)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => {
                // Only process key press events (Windows reports Press + Release)
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Help modal takes over input
                if app.help_modal {
                    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        return Ok(());
                    }
                    handle_help_key(app, key.code);
                    continue;
                }

                if let Some(action) = translate(app.mode, key) {
                    if apply_action(app, action, clipboard) == ApplyResult::Quit {
                        return Ok(());
                    }
                    continue;
                }

                // Text entry fallbacks
                match app.mode {
                    Mode::Filter => handle_filter_text(app, key),
                    Mode::Command => handle_command_text(app, key),
                    Mode::Normal => {}
                }
            }
            Event::Mouse(mouse) => {
                let size = terminal.size()?;
                let terminal_area = Rect::new(0, 0, size.width, size.height);
                handle_mouse_event(app, terminal_area, mouse);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edbv_core::{MappingEntry, MappingTable, Viewer};
    use std::sync::Arc;

    fn left_click(col: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: col,
            row,
            modifiers: KeyModifiers::empty(),
        }
    }

    fn app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Custom.binds");
        let mut xml = String::from("<Root>");
        let mut entries = Vec::new();
        for i in 0..6 {
            xml.push_str(&format!("<C{0}><Primary Device=\"Keyboard\" Key=\"K\"/></C{0}>", i));
            entries.push(MappingEntry::new(&format!("C{}", i), "Ship", "Misc", ""));
        }
        xml.push_str("</Root>");
        std::fs::write(&path, xml).unwrap();
        let mut viewer = Viewer::new(Arc::new(MappingTable::from_entries(entries)));
        viewer.load_file(&path).unwrap();
        let mut app = App::new(viewer);
        app.visible_rows = 10;
        (dir, app)
    }

    #[test]
    fn click_selects_row_in_normal_mode() {
        let (_dir, mut app) = app();
        let terminal_area = Rect::new(0, 0, 80, 24);
        let [_h, _f, table_area, _s] = ui::split_main_chunks(terminal_area);

        handle_mouse_event(&mut app, terminal_area, left_click(5, table_area.y + 4));
        assert_eq!(app.cursor_row, 2);
        assert_eq!(app.selected_row().unwrap().action, "C2");
    }

    #[test]
    fn click_ignored_outside_normal_mode_or_with_help_open() {
        let (_dir, mut app) = app();
        let terminal_area = Rect::new(0, 0, 80, 24);
        let [_h, _f, table_area, _s] = ui::split_main_chunks(terminal_area);

        app.mode = Mode::Filter;
        handle_mouse_event(&mut app, terminal_area, left_click(5, table_area.y + 4));
        assert_eq!(app.cursor_row, 0);

        app.mode = Mode::Normal;
        app.help_modal = true;
        handle_mouse_event(&mut app, terminal_area, left_click(5, table_area.y + 4));
        assert_eq!(app.cursor_row, 0);
    }

    #[test]
    fn scroll_wheel_moves_cursor() {
        let (_dir, mut app) = app();
        let terminal_area = Rect::new(0, 0, 80, 24);
        let scroll = |kind| MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::empty(),
        };
        handle_mouse_event(&mut app, terminal_area, scroll(MouseEventKind::ScrollDown));
        assert_eq!(app.cursor_row, 3);
        handle_mouse_event(&mut app, terminal_area, scroll(MouseEventKind::ScrollUp));
        assert_eq!(app.cursor_row, 0);
    }

    #[test]
    fn help_keys_scroll_and_close() {
        let (_dir, mut app) = app();
        app.open_help_modal();
        handle_help_key(&mut app, KeyCode::PageDown);
        assert_eq!(app.help_scroll, 12);
        handle_help_key(&mut app, KeyCode::Char('k'));
        assert_eq!(app.help_scroll, 11);
        handle_help_key(&mut app, KeyCode::Esc);
        assert!(!app.help_modal);
    }
}
