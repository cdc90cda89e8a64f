use super::render::centered_rect;
use super::styles::*;
use crate::form::{CreationForm, FormField};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

fn field_line<'a>(label: String, value: &'a str, focused: bool) -> Line<'a> {
    let style = if focused { HIGHLIGHT_STYLE } else { BASE_STYLE };
    let mut spans = vec![
        Span::styled(label, style),
        Span::styled(
            value,
            if focused {
                style.add_modifier(Modifier::UNDERLINED)
            } else {
                style
            },
        ),
    ];
    if focused {
        spans.push(Span::styled("_", style));
    }
    Line::from(spans)
}

pub fn render_form(f: &mut Frame, area: Rect, form: &CreationForm, spinner_frame: &str) {
    let height = u16::try_from(form.steps.len())
        .unwrap_or(u16::MAX)
        .saturating_add(8);
    let form_area = centered_rect(70, height, area);

    let mut lines = vec![field_line(
        "Name: ".to_string(),
        &form.name,
        form.focus == FormField::Name,
    )];
    lines.push(Line::from(""));
    for (i, step) in form.steps.iter().enumerate() {
        lines.push(field_line(
            format!("Step {}: ", i + 1),
            step,
            form.focus == FormField::Step(i),
        ));
    }
    lines.push(Line::from(""));

    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(error.as_str(), STATUS_ERROR_STYLE)));
    } else {
        lines.push(Line::from(""));
    }

    lines.push(if form.is_busy() {
        Line::from(Span::styled(
            format!("{} Adding drink...", spinner_frame),
            STATUS_WARNING_STYLE,
        ))
    } else {
        Line::from(vec![
            Span::styled("Enter", KEY_STYLE),
            Span::styled(": Add Drink", Style::default().fg(Color::Gray)),
        ])
    });

    let block = Block::default()
        .title(" New Drink ")
        .title_style(TITLE_STYLE)
        .borders(Borders::ALL)
        .border_style(ACTIVE_BORDER_STYLE)
        .style(Style::default().bg(Color::Black));

    f.render_widget(Clear, form_area);
    f.render_widget(Paragraph::new(lines).block(block), form_area);
}
