//! UI rendering and layout using egui.
//!
//! Drawing functions never change the viewer directly; they push
//! [`Action`]s for the caller to apply.

use crate::gui::actions::Action;
use crate::gui::app::GuiApp;
use crate::gui::state::GuiState;
use crate::update::CURRENT_VERSION;
use edbv_core::view::COLUMN_HEADERS;
use eframe::egui;
use std::path::PathBuf;

pub const AMBER: egui::Color32 = egui::Color32::from_rgb(255, 176, 0);
const DIM_AMBER: egui::Color32 = egui::Color32::from_rgb(150, 100, 0);
const HIGHLIGHT_BG: egui::Color32 = egui::Color32::from_rgb(120, 30, 0);
const HIGHLIGHT_FG: egui::Color32 = egui::Color32::from_rgb(255, 220, 160);

pub const SEARCH_ID: &str = "edbv_search";

/// Amber-on-black theme.
pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = egui::Color32::BLACK;
    visuals.window_fill = egui::Color32::from_gray(12);
    visuals.extreme_bg_color = egui::Color32::from_gray(18);
    visuals.faint_bg_color = egui::Color32::from_gray(14);
    visuals.override_text_color = Some(AMBER);
    visuals.hyperlink_color = AMBER;
    visuals.selection.bg_fill = DIM_AMBER;
    visuals.selection.stroke.color = AMBER;
    visuals.widgets.noninteractive.bg_stroke.color = DIM_AMBER;
    visuals.widgets.inactive.bg_fill = egui::Color32::from_gray(24);
    visuals.widgets.hovered.bg_stroke.color = AMBER;
    ctx.set_visuals(visuals);

    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(8.0, 4.0);
        style
            .text_styles
            .insert(egui::TextStyle::Body, egui::FontId::proportional(14.0));
        style
            .text_styles
            .insert(egui::TextStyle::Heading, egui::FontId::proportional(16.0));
    });
}

pub fn draw_menu_bar(ui: &mut egui::Ui, app: &GuiApp, state: &GuiState, actions: &mut Vec<Action>) {
    egui::menu::bar(ui, |ui| {
        ui.menu_button("File", |ui| {
            ui.menu_button("Settings", |ui| {
                let mut show_unbound = app.viewer.view().highlight_unbound;
                if ui.checkbox(&mut show_unbound, "Show Unbound").changed() {
                    actions.push(Action::SetShowUnbound(show_unbound));
                }
                let mut keep_on_top = state.keep_on_top;
                if ui.checkbox(&mut keep_on_top, "Keep On Top").changed() {
                    actions.push(Action::SetKeepOnTop(keep_on_top));
                }
                if ui.button("Set Bindings Directory…").clicked() {
                    actions.push(Action::OpenDirectoryWindow);
                    ui.close_menu();
                }
            });
            ui.separator();
            if ui.button("Close").clicked() {
                actions.push(Action::Close);
                ui.close_menu();
            }
        });
        ui.menu_button("Help", |ui| {
            if ui.button("How to Use").clicked() {
                actions.push(Action::ShowHelp);
                ui.close_menu();
            }
            if ui.button("About").clicked() {
                actions.push(Action::ShowAbout);
                ui.close_menu();
            }
        });
    });
}

/// Binding-file picker and search line.
pub fn draw_controls(
    ui: &mut egui::Ui,
    app: &mut GuiApp,
    state: &mut GuiState,
    actions: &mut Vec<Action>,
) {
    ui.horizontal(|ui| {
        ui.label("Current Binding File:");
        let selected_text = app
            .viewer
            .current_label()
            .unwrap_or_else(|| "(none)".to_string());
        egui::ComboBox::from_id_salt("binding_file")
            .selected_text(selected_text)
            .width(260.0)
            .show_ui(ui, |ui| {
                for (index, file) in app.viewer.files().iter().enumerate() {
                    let is_current = app.viewer.selected_index() == Some(index);
                    if ui.selectable_label(is_current, file.label.as_str()).clicked() && !is_current {
                        actions.push(Action::SelectFile(index));
                    }
                }
            });
    });

    ui.horizontal(|ui| {
        let search_id = egui::Id::new(SEARCH_ID);
        let clear_width = 60.0;
        let resp = ui.add(
            egui::TextEdit::singleline(&mut app.search_text)
                .id(search_id)
                .hint_text("Search actions, areas and categories…")
                .desired_width(ui.available_width() - clear_width),
        );
        if resp.changed() {
            actions.push(Action::SearchChanged);
        }
        if state.request_focus_search {
            resp.request_focus();
            state.request_focus_search = false;
        }
        if ui.button("Clear").clicked() {
            actions.push(Action::ClearSearch);
        }
    });
}

pub fn draw_status_bar(ui: &mut egui::Ui, app: &GuiApp) {
    let status = if app.status.is_empty() {
        "Ctrl+F Search  |  Esc Clear  |  Ctrl+U Show Unbound  |  Ctrl+C Copy row  |  Ctrl+W Close"
            .to_string()
    } else {
        app.status.clone()
    };
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(status).size(12.0));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                egui::RichText::new(format!(
                    "{} of {} controls",
                    app.rows().len(),
                    app.viewer.raw_count()
                ))
                .size(12.0)
                .color(DIM_AMBER),
            );
        });
    });
}

/// The bindings table.
pub fn draw_table(ui: &mut egui::Ui, app: &GuiApp, state: &mut GuiState, actions: &mut Vec<Action>) {
    if app.rows().is_empty() {
        ui.centered_and_justified(|ui| {
            let message = if app.viewer.raw_count() == 0 {
                "No bindings loaded. Use File → Settings → Set Bindings Directory…"
            } else {
                "No matching controls"
            };
            ui.label(egui::RichText::new(message).color(DIM_AMBER));
        });
        return;
    }

    let scroll_to_selected = std::mem::take(&mut state.scroll_to_selected);

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            egui::Grid::new("bindings_table")
                .num_columns(COLUMN_HEADERS.len())
                .striped(true)
                .spacing(egui::vec2(16.0, 4.0))
                .show(ui, |ui| {
                    for header in COLUMN_HEADERS {
                        ui.label(egui::RichText::new(header).strong().underline());
                    }
                    ui.end_row();

                    for (index, row) in app.rows().iter().enumerate() {
                        let is_selected = app.selected_row == Some(index);
                        for text in row.columns() {
                            let mut rich = egui::RichText::new(text);
                            if row.highlight {
                                rich = rich.color(HIGHLIGHT_FG).background_color(HIGHLIGHT_BG);
                            }
                            let resp = ui.add(egui::SelectableLabel::new(is_selected, rich));
                            if resp.clicked() {
                                actions.push(Action::SelectRow(index));
                            }
                            if is_selected && scroll_to_selected {
                                resp.scroll_to_me(None);
                            }
                        }
                        ui.end_row();
                    }
                });
        });
}

/// Help, About, directory and update windows.
pub fn draw_windows(
    ctx: &egui::Context,
    app: &GuiApp,
    state: &mut GuiState,
    actions: &mut Vec<Action>,
) {
    egui::Window::new("How to Use")
        .open(&mut state.show_help)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label("1. File → Settings → Set Bindings Directory… and pick the folder holding your .binds files.");
            ui.label("2. Choose a file from Current Binding File.");
            ui.label("3. Type in the search box to filter by action, area or category.");
            ui.label("4. Show Unbound highlights controls with no device assigned.");
            ui.label("Select a row and press Ctrl+C to copy it.");
        });

    egui::Window::new("About")
        .open(&mut state.show_about)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading(format!("Elite Dangerous Bindings Viewer {}", CURRENT_VERSION));
            ui.label("A searchable table of control bindings.");
        });

    if state.show_dir_window {
        let mut open = true;
        egui::Window::new("Set Bindings Directory")
            .open(&mut open)
            .collapsible(false)
            .show(ctx, |ui| {
                let resp = ui.add(
                    egui::TextEdit::singleline(&mut state.dir_input)
                        .hint_text("Folder containing .binds files")
                        .desired_width(420.0),
                );
                let submitted =
                    resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                ui.horizontal(|ui| {
                    if ui.button("Open").clicked() || submitted {
                        let dir = state.dir_input.trim();
                        if !dir.is_empty() {
                            actions.push(Action::SetDirectory(PathBuf::from(dir)));
                        }
                    }
                    if ui.button("Cancel").clicked() {
                        state.show_dir_window = false;
                    }
                });
            });
        if !open {
            state.show_dir_window = false;
        }
    }

    if let Some(notice) = &app.update_notice
        && !state.update_dismissed
    {
        egui::Window::new("Update Available")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(notice.message());
                if let Some(page) = &notice.release_page {
                    ui.hyperlink_to("Open the release page", page);
                }
                if ui.button("Close").clicked() {
                    actions.push(Action::DismissUpdate);
                }
            });
    }
}
