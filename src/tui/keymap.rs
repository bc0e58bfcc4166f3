//! Key translation layer.
//!
//! This keeps key handling separate from app behavior: keys become
//! [`Action`]s, which `actions::apply_action` applies to the [`App`].
//!
//! [`App`]: super::app::App

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::Mode;

/// Actions that can be triggered by key presses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Move the row cursor by this many rows.
    Move(i32),
    /// Move by a page in this direction.
    Page(i32),
    GotoFirst,
    GotoLast,
    NextFile,
    PrevFile,
    Reload,
    ToggleUnbound,
    /// Copy the selected row to the clipboard.
    Yank,
    ClearFilter,
    EnterFilter,
    /// Keep the filter and return to Normal mode.
    CommitFilter,
    /// Clear the filter and return to Normal mode.
    CancelFilter,
    EnterCommand,
    ExecuteCommand,
    CancelCommand,
    OpenHelp,
    Quit,
}

pub fn translate(mode: Mode, key: KeyEvent) -> Option<Action> {
    match mode {
        Mode::Normal => match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::Quit)
            }
            KeyCode::Up | KeyCode::Char('k') => Some(Action::Move(-1)),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::Move(1)),
            KeyCode::PageUp => Some(Action::Page(-1)),
            KeyCode::PageDown => Some(Action::Page(1)),
            KeyCode::Home | KeyCode::Char('g') => Some(Action::GotoFirst),
            KeyCode::End | KeyCode::Char('G') => Some(Action::GotoLast),

            KeyCode::Tab => Some(Action::NextFile),
            KeyCode::BackTab => Some(Action::PrevFile),
            KeyCode::Char('r') => Some(Action::Reload),
            KeyCode::Char('u') => Some(Action::ToggleUnbound),
            KeyCode::Char('y') => Some(Action::Yank),
            KeyCode::Char('c') => Some(Action::ClearFilter),

            KeyCode::Char('/') => Some(Action::EnterFilter),
            KeyCode::Char(':') => Some(Action::EnterCommand),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },

        Mode::Filter => match key.code {
            KeyCode::Esc => Some(Action::CancelFilter),
            KeyCode::Enter => Some(Action::CommitFilter),
            _ => None,
        },

        Mode::Command => match key.code {
            KeyCode::Esc => Some(Action::CancelCommand),
            KeyCode::Enter => Some(Action::ExecuteCommand),
            _ => None,
        },
    }
}
