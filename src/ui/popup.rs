// src/ui/popup.rs

use super::render::centered_rect;
use super::styles::*;
use crate::app::Popup;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render_popup(f: &mut Frame, area: Rect, popup: &Popup) {
    // Borders, blank line and footer
    let height = u16::try_from(popup.steps.len())
        .unwrap_or(u16::MAX)
        .saturating_add(5);
    let popup_area = centered_rect(60, height, area);

    let mut lines: Vec<Line> = popup
        .steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            let (symbol, color) = popup
                .progress
                .indicator(i)
                .get_symbol_and_color(popup.spinner.frame());
            Line::from(vec![
                Span::styled(
                    format!("{} ", symbol),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::raw(step.as_str()),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(if popup.progress.is_done() {
        Line::from(Span::styled(
            format!("Your {} is ready!", popup.title),
            STATUS_VALUE_STYLE,
        ))
    } else {
        Line::from(Span::styled(
            format!(
                "Step {} of {}",
                popup.progress.current() + 1,
                popup.progress.total()
            ),
            STATUS_WARNING_STYLE,
        ))
    });

    let block = Block::default()
        .title(format!(" {} ", popup.title))
        .title_style(TITLE_STYLE)
        .title_bottom(Line::from(" Esc: Close ").alignment(Alignment::Right))
        .borders(Borders::ALL)
        .border_style(ACTIVE_BORDER_STYLE)
        .style(BASE_STYLE);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area); // Clear the background
    f.render_widget(paragraph, popup_area);
}
