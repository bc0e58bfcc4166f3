//! UI rendering

use super::app::{App, Mode};
use super::help::{get_about_help, get_commands_help, get_help_text};
use edbv_core::view::COLUMN_HEADERS;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
};

pub(crate) const HEADER_HEIGHT: u16 = 1;
pub(crate) const FILTER_BAR_HEIGHT: u16 = 3;
pub(crate) const TABLE_MIN_HEIGHT: u16 = 5;
pub(crate) const STATUS_BAR_HEIGHT: u16 = 1;
pub(crate) const COLUMN_SPACING: u16 = 1;

const COLUMN_WIDTHS: [Constraint; 5] = [
    Constraint::Percentage(14),
    Constraint::Percentage(18),
    Constraint::Percentage(28),
    Constraint::Percentage(20),
    Constraint::Percentage(20),
];

const AMBER: Color = Color::Rgb(255, 176, 0);

pub(crate) fn split_main_chunks(area: Rect) -> [Rect; 4] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(FILTER_BAR_HEIGHT),
            Constraint::Min(TABLE_MIN_HEIGHT),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2], chunks[3]]
}

/// Index into `app.rows()` of the table row under the mouse, if any.
pub(crate) fn table_row_at(
    app: &App,
    table_area: Rect,
    mouse_col: u16,
    mouse_row: u16,
) -> Option<usize> {
    if table_area.width < 3 || table_area.height < 4 {
        return None;
    }

    let inner_x = table_area.x.saturating_add(1);
    let inner_y = table_area.y.saturating_add(1);
    let inner_right = inner_x.saturating_add(table_area.width.saturating_sub(2));
    let inner_bottom = inner_y.saturating_add(table_area.height.saturating_sub(2));

    if mouse_col < inner_x
        || mouse_col >= inner_right
        || mouse_row < inner_y
        || mouse_row >= inner_bottom
    {
        return None;
    }

    // Header row holds the column titles.
    if mouse_row == inner_y {
        return None;
    }

    let rel_row = mouse_row.saturating_sub(inner_y.saturating_add(1)) as usize;
    if rel_row >= app.visible_rows {
        return None;
    }
    let row = app.viewport_row.saturating_add(rel_row);
    (row < app.rows().len()).then_some(row)
}

/// Draw the application UI
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = split_main_chunks(f.area());

    // header + borders
    app.visible_rows = (chunks[2].height.saturating_sub(3) as usize).max(1);
    app.update_viewport();

    draw_header(f, app, chunks[0]);
    draw_filter_bar(f, app, chunks[1]);
    draw_table(f, app, chunks[2]);
    draw_status_bar(f, app, chunks[3]);

    if app.help_modal {
        draw_help_modal(f, app);
    }
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let file = match (app.viewer.current_label(), app.viewer.selected_index()) {
        (Some(label), Some(index)) => {
            format!("{} [{}/{}]", label, index + 1, app.viewer.files().len())
        }
        (Some(label), None) => label,
        (None, _) => "(no binding file)".to_string(),
    };
    let dir = app
        .viewer
        .directory()
        .map(|d| d.display().to_string())
        .unwrap_or_else(|| "(no directory)".to_string());

    let line = Line::from(vec![
        Span::styled(
            " Current Binding File: ",
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(file, Style::default().fg(AMBER).add_modifier(Modifier::BOLD)),
        Span::styled("  in ", Style::default().fg(Color::DarkGray)),
        Span::styled(dir, Style::default().fg(Color::Gray)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_filter_bar(f: &mut Frame, app: &App, area: Rect) {
    let (content, title, color) = match app.mode {
        Mode::Filter => {
            // Insert cursor marker at cursor position
            let (before, after) = app.filter_buffer.split_at(app.filter_cursor);
            (format!("/{}│{}", before, after), " Filter ", Color::Yellow)
        }
        Mode::Command => {
            let (before, after) = app.command_buffer.split_at(app.command_cursor);
            (format!(":{}│{}", before, after), " Command ", Color::Cyan)
        }
        Mode::Normal => {
            let filter = &app.viewer.view().filter;
            let content = if filter.is_empty() {
                "Press / to search actions, areas and categories".to_string()
            } else {
                format!("/{}", filter)
            };
            (content, " Search ", Color::White)
        }
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(color));

    let style = if app.mode == Mode::Normal && app.viewer.view().filter.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    f.render_widget(Paragraph::new(content).style(style).block(block), area);
}

fn draw_table(f: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(COLUMN_HEADERS.iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(AMBER).add_modifier(Modifier::BOLD))
    }))
    .height(1);

    let rows = app
        .rows()
        .iter()
        .enumerate()
        .skip(app.viewport_row)
        .take(app.visible_rows)
        .map(|(index, row)| {
            let style = if index == app.cursor_row {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if row.highlight {
                Style::default().fg(Color::Black).bg(AMBER)
            } else {
                Style::default()
            };
            Row::new(row.columns().map(|text| Cell::from(text.to_string()))).style(style)
        })
        .collect::<Vec<_>>();

    let title = format!(
        " {} of {} controls{} ",
        app.rows().len(),
        app.viewer.raw_count(),
        if app.viewer.view().highlight_unbound {
            "  [Show Unbound]"
        } else {
            ""
        }
    );

    let table = Table::new(rows, COLUMN_WIDTHS)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .column_spacing(COLUMN_SPACING);

    f.render_widget(table, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let hint = "j/k:move  /:filter  Tab:next file  u:unbound  y:copy  ?:help  q:quit";

    let status = if app.status_message.is_empty() {
        hint.to_string()
    } else {
        app.status_message.clone()
    };

    let style = if app.status_message.starts_with("Error") {
        Style::default().fg(Color::Red)
    } else if !app.status_message.is_empty() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    f.render_widget(Paragraph::new(Line::from(Span::styled(status, style))), area);
}

fn styled_help_line(text: String, title: &str) -> Line<'static> {
    let style = if text == title {
        Style::default().fg(AMBER).add_modifier(Modifier::BOLD)
    } else if text.starts_with("  ") {
        Style::default().fg(Color::White)
    } else {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    };
    Line::from(Span::styled(text, style))
}

fn draw_help_modal(f: &mut Frame, app: &App) {
    let area = centered_rect(80, 80, f.area());

    let modal_style = Style::default().fg(Color::White).bg(Color::Black);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .border_style(Style::default().fg(AMBER))
        .style(modal_style);

    let mut lines: Vec<Line> = get_about_help()
        .into_iter()
        .map(|text| styled_help_line(text, "How to Use"))
        .collect();
    lines.push(Line::from(""));
    lines.extend(get_help_text().into_iter().map(|text| styled_help_line(text, "")));
    lines.push(Line::from(""));
    lines.extend(
        get_commands_help()
            .into_iter()
            .map(|text| styled_help_line(text, "Commands")),
    );

    let viewport_height = area.height.saturating_sub(2) as usize;
    let max_scroll = lines.len().saturating_sub(viewport_height);
    let effective_scroll = app.help_scroll.min(max_scroll);
    let scroll_y = u16::try_from(effective_scroll).unwrap_or(u16::MAX);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(modal_style)
        .scroll((scroll_y, 0))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use edbv_core::{MappingEntry, MappingTable, Viewer};
    use ratatui::{Terminal, backend::TestBackend};
    use std::sync::Arc;

    fn app_with_rows(count: usize) -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let mut xml = String::from("<Root>");
        let mut entries = Vec::new();
        for i in 0..count {
            let code = format!("Control{}", i);
            xml.push_str(&format!("<{0}><Primary Device=\"Keyboard\" Key=\"K{1}\"/></{0}>", code, i));
            entries.push(MappingEntry::new(&code, "Ship", "Misc", &format!("Action {}", i)));
        }
        xml.push_str("</Root>");
        let path = dir.path().join("Custom.binds");
        std::fs::write(&path, xml).unwrap();
        let mut viewer = Viewer::new(Arc::new(MappingTable::from_entries(entries)));
        viewer.load_file(&path).unwrap();
        (dir, App::new(viewer))
    }

    #[test]
    fn table_row_at_maps_first_body_row_to_viewport() {
        let (_dir, mut app) = app_with_rows(10);
        app.visible_rows = 5;
        app.viewport_row = 3;
        let table_area = Rect::new(0, 4, 80, 10);
        assert_eq!(table_row_at(&app, table_area, 5, table_area.y + 2), Some(3));
        assert_eq!(table_row_at(&app, table_area, 5, table_area.y + 3), Some(4));
    }

    #[test]
    fn table_row_at_ignores_header_and_borders() {
        let (_dir, mut app) = app_with_rows(10);
        app.visible_rows = 5;
        let table_area = Rect::new(0, 4, 80, 10);
        assert_eq!(table_row_at(&app, table_area, 5, table_area.y), None);
        assert_eq!(table_row_at(&app, table_area, 5, table_area.y + 1), None);
        assert_eq!(table_row_at(&app, table_area, 0, table_area.y + 2), None);
    }

    #[test]
    fn table_row_at_ignores_rows_past_the_end() {
        let (_dir, mut app) = app_with_rows(2);
        app.visible_rows = 5;
        let table_area = Rect::new(0, 4, 80, 10);
        assert_eq!(table_row_at(&app, table_area, 5, table_area.y + 4), None);
    }

    #[test]
    fn draw_sizes_viewport_and_renders_rows() {
        let (_dir, mut app) = app_with_rows(30);
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();
        // 20 - header - filter bar - status = 15 table lines, minus borders and header
        assert_eq!(app.visible_rows, 12);

        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Action 0"));
        assert!(text.contains("30 of 30 controls"));
    }
}
