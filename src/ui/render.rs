use super::styles::*;
use super::{form::render_form, popup::render_popup};
use crate::app::DrinkMaker;
use crate::directory::LoadStatus;
use crate::types::AppMode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn render_all(f: &mut Frame, app: &DrinkMaker) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Status
            Constraint::Min(5),    // Drinks
            Constraint::Length(8), // Logs
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    render_title(f, chunks[0]);
    render_status(f, chunks[1], app);

    if app.mode == AppMode::ViewLogs {
        let logs_area = Rect {
            height: chunks[2].height + chunks[3].height,
            ..chunks[2]
        };
        render_logs(f, logs_area, app);
    } else {
        render_drinks(f, chunks[2], app);
        render_logs(f, chunks[3], app);
    }

    render_help(f, chunks[4], app);

    match app.mode {
        AppMode::Popup => {
            if let Some(popup) = &app.popup {
                render_popup(f, f.area(), popup);
            }
        }
        AppMode::CreateDrink => {
            if let Some(form) = &app.form {
                render_form(f, f.area(), form, app.busy_spinner.frame());
            }
        }
        _ => {}
    }
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            "Hot Drinks ",
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Maker ",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("5000", Style::default().fg(Color::Cyan).bold().underlined()),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(BORDER_STYLE),
    );
    f.render_widget(title, area);
}

fn render_status(f: &mut Frame, area: Rect, app: &DrinkMaker) {
    let style = match app.loader.status() {
        LoadStatus::Loading => STATUS_WARNING_STYLE,
        LoadStatus::Ready => STATUS_VALUE_STYLE,
        LoadStatus::Error(_) => STATUS_ERROR_STYLE,
    };

    let status = Paragraph::new(Span::styled(app.status_line(), style))
        .block(
            Block::default()
                .title("Status")
                .title_style(TITLE_STYLE)
                .borders(Borders::ALL)
                .border_style(BORDER_STYLE),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(status, area);
}

pub fn render_drinks(f: &mut Frame, area: Rect, app: &DrinkMaker) {
    // The list stays hidden until the directory has finished loading.
    let names = if app.loader.is_loading() {
        Vec::new()
    } else {
        app.drink_names()
    };

    let items: Vec<ListItem> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let (prefix, style) = if i == app.selected {
                ("> ", MENU_HIGHLIGHT_STYLE)
            } else {
                ("  ", MENU_STYLE)
            };
            let steps = app.loader.directory().get(name).map_or(0, Vec::len);

            ListItem::new(Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(name.as_str(), style),
                Span::styled(
                    format!("  ({} steps)", steps),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title("Drinks")
            .title_style(TITLE_STYLE)
            .borders(Borders::ALL)
            .border_style(if app.mode == AppMode::Normal {
                ACTIVE_BORDER_STYLE
            } else {
                BORDER_STYLE
            }),
    );

    f.render_widget(list, area);
}

pub fn render_logs(f: &mut Frame, area: Rect, app: &DrinkMaker) {
    let logs = app.logs();
    let log_count = logs.len();

    let visible_height = (area.height as usize).saturating_sub(2); // Subtract 2 for borders
    // Keep the scrolled-to line at the bottom of the panel.
    let end_index = (app.log_scroll + 1).min(log_count);
    let start_index = end_index.saturating_sub(visible_height);

    let visible_logs: Vec<ListItem> = logs[start_index..end_index]
        .iter()
        .map(|log| {
            let style = if log.contains("Error") || log.contains("failed") {
                LOG_ERROR_STYLE
            } else if log.contains("Successfully") || log.contains("successfully") {
                LOG_SUCCESS_STYLE
            } else if log.contains("[DEBUG]") {
                LOG_DEBUG_STYLE
            } else {
                LOG_INFO_STYLE
            };

            ListItem::new(Line::from(vec![Span::styled(log.as_str(), style)]))
        })
        .collect();

    let scroll_indicator = if log_count > visible_height {
        format!(" [{}-{}/{}]", start_index + 1, end_index, log_count)
    } else {
        String::new()
    };

    let at_bottom = end_index == log_count;
    let scroll_style = if at_bottom {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let list = List::new(visible_logs).block(
        Block::default()
            .title(Span::styled(format!("Logs{}", scroll_indicator), scroll_style))
            .title_style(match app.mode {
                AppMode::ViewLogs => TITLE_STYLE.add_modifier(Modifier::REVERSED),
                _ => TITLE_STYLE,
            })
            .borders(Borders::ALL)
            .border_style(BORDER_STYLE),
    );

    f.render_widget(list, area);
}

fn key_hints<'a>(hints: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut spans = Vec::new();
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" | "));
        }
        spans.push(Span::styled(*key, KEY_STYLE));
        spans.push(Span::raw(format!(": {}", action)));
    }
    spans
}

pub fn render_help(f: &mut Frame, area: Rect, app: &DrinkMaker) {
    let help_text = match app.mode {
        AppMode::ViewLogs => key_hints(&[
            ("↑/↓", "Scroll"),
            ("PgUp/PgDn", "Page Scroll"),
            ("Esc", "Exit Log View"),
        ]),
        AppMode::Popup => key_hints(&[("Esc", "Close"), ("Q", "Quit")]),
        AppMode::CreateDrink => key_hints(&[
            ("Tab", "Next Field"),
            ("Ctrl+A", "Add Step"),
            ("Ctrl+D", "Remove Step"),
            ("Enter", "Submit"),
            ("Esc", "Cancel"),
        ]),
        AppMode::Normal => key_hints(&[
            ("↑/↓", "Navigate"),
            ("Enter", "Make"),
            ("N", "New Drink"),
            ("R", "Refresh"),
            ("L", "Logs"),
            ("Q", "Quit"),
        ]),
    };

    let help = Paragraph::new(Line::from(help_text))
        .block(
            Block::default()
                .title("Help")
                .title_style(TITLE_STYLE)
                .borders(Borders::ALL)
                .border_style(BORDER_STYLE),
        )
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);

    f.render_widget(help, area);
}

pub(super) fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let height = height.min(r.height);
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height - height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
