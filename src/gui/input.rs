//! Keyboard input handling and event translation to actions.

use crate::gui::actions::Action;
use eframe::egui;
use egui::{Key, Modifiers};

/// Consume a shortcut. `COMMAND` maps to Ctrl on Windows/Linux and Cmd on
/// macOS.
fn consume_shortcut(ctx: &egui::Context, key: Key) -> bool {
    ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(Modifiers::COMMAND, key)))
}

/// Translate keyboard events to actions.
///
/// `search_focused` keeps plain keys and copy for the search box.
pub fn handle_keyboard_input(ctx: &egui::Context, search_focused: bool) -> Option<Action> {
    if consume_shortcut(ctx, Key::W) {
        return Some(Action::Close);
    }
    if consume_shortcut(ctx, Key::F) {
        return Some(Action::FocusSearch);
    }
    if consume_shortcut(ctx, Key::U) {
        return Some(Action::ToggleUnbound);
    }
    if ctx.input_mut(|i| i.consume_key(Modifiers::NONE, Key::Escape)) {
        return Some(Action::ClearSearch);
    }

    if search_focused {
        return None;
    }

    // egui turns Ctrl+C into a Copy event
    let copy = ctx.input(|i| i.events.iter().any(|ev| matches!(ev, egui::Event::Copy)));
    if copy {
        return Some(Action::CopySelected);
    }

    let input = ctx.input(|i| i.clone());
    if input.key_pressed(Key::ArrowDown) {
        return Some(Action::MoveSelection(1));
    }
    if input.key_pressed(Key::ArrowUp) {
        return Some(Action::MoveSelection(-1));
    }
    if input.key_pressed(Key::PageDown) {
        return Some(Action::MoveSelection(20));
    }
    if input.key_pressed(Key::PageUp) {
        return Some(Action::MoveSelection(-20));
    }

    None
}
