//! edbv GUI - egui-based desktop front end.
//!
//! - app.rs: viewer session, selection and search state
//! - state.rs: windows, focus and window level
//! - actions.rs: action types and dispatch
//! - input.rs: keyboard shortcuts
//! - ui.rs: egui rendering

pub mod actions;
pub mod app;
pub mod input;
pub mod state;
pub mod ui;

use eframe::egui;
use std::time::Duration;

use self::actions::{Action, apply_action};
use self::app::GuiApp;
use self::input::handle_keyboard_input;
use self::state::GuiState;
use self::ui::{
    SEARCH_ID, apply_theme, draw_controls, draw_menu_bar, draw_status_bar, draw_table,
    draw_windows,
};
use crate::clipboard::{ClipboardProvider, SystemClipboard};

fn handle_copy_selected<C: ClipboardProvider>(app: &mut GuiApp, clipboard: &mut C) {
    let Some(text) = app.selected_text() else {
        app.status = "Select a row to copy".to_string();
        return;
    };
    if clipboard.set_text(text) {
        app.status = "✓ Copied row".to_string();
    } else {
        app.status = "✗ Copy failed: clipboard unavailable".to_string();
    }
}

fn window_level(keep_on_top: bool) -> egui::viewport::WindowLevel {
    if keep_on_top {
        egui::viewport::WindowLevel::AlwaysOnTop
    } else {
        egui::viewport::WindowLevel::Normal
    }
}

/// Main GUI application wrapper implementing eframe::App trait.
pub struct EdbvGuiApp {
    app: GuiApp,
    state: GuiState,
    clipboard: SystemClipboard,
}

impl EdbvGuiApp {
    pub fn new(app: GuiApp, keep_on_top: bool) -> Self {
        Self {
            app,
            state: GuiState::new(keep_on_top),
            clipboard: SystemClipboard,
        }
    }

    fn handle_action(&mut self, ctx: &egui::Context, action: Action) {
        match action {
            Action::CopySelected => handle_copy_selected(&mut self.app, &mut self.clipboard),
            Action::Close => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            other => apply_action(&mut self.app, &mut self.state, other),
        }
        if std::mem::take(&mut self.state.window_level_dirty) {
            ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(window_level(
                self.state.keep_on_top,
            )));
        }
    }
}

impl eframe::App for EdbvGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        apply_theme(ctx);

        self.app.poll_update();
        if self.app.update_pending() {
            ctx.request_repaint_after(Duration::from_millis(500));
        }

        let mut actions = Vec::new();

        let search_focused = ctx.memory(|m| m.focused()) == Some(egui::Id::new(SEARCH_ID));
        if let Some(action) = handle_keyboard_input(ctx, search_focused) {
            actions.push(action);
        }

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            draw_menu_bar(ui, &self.app, &self.state, &mut actions);
        });

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_space(4.0);
            draw_controls(ui, &mut self.app, &mut self.state, &mut actions);
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            draw_status_bar(ui, &self.app);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            draw_table(ui, &self.app, &mut self.state, &mut actions);
        });

        draw_windows(ctx, &self.app, &mut self.state, &mut actions);

        if !actions.is_empty() {
            for action in actions {
                self.handle_action(ctx, action);
            }
            ctx.request_repaint();
        }
    }
}
