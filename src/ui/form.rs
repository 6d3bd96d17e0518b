//! Create-incident modal rendering.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::api::Status;
use crate::app::{App, FormField};

pub fn draw_form(f: &mut Frame, app: &App) {
    let form = &app.state.form;
    let area = super::centered(f.area(), 60, 12);
    f.render_widget(Clear, area);

    let label = |field: FormField, text: &'static str| {
        let style = if form.focus == field {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        Span::styled(text, style)
    };
    let cursor = |field: FormField| if form.focus == field { "▏" } else { "" };

    let status_spans: Vec<Span> = Status::ALL
        .iter()
        .map(|s| {
            let style = if *s == form.status {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Span::styled(format!(" {} ", s.label()), style)
        })
        .collect();

    let mut lines = vec![
        Line::default(),
        Line::from(vec![
            label(FormField::Title, " Title*    "),
            Span::raw(form.title.as_str()),
            Span::raw(cursor(FormField::Title)),
        ]),
        Line::default(),
        Line::from(vec![
            label(FormField::Location, " Location* "),
            Span::raw(form.location.as_str()),
            Span::raw(cursor(FormField::Location)),
        ]),
        Line::default(),
        Line::from([vec![label(FormField::Status, " Status    ")], status_spans].concat()),
        Line::default(),
    ];

    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            Style::default().fg(Color::Red),
        )));
    } else if form.submitting {
        lines.push(Line::from(Span::styled(
            " ◐ Creating...",
            Style::default().fg(Color::Yellow),
        )));
    }

    let submit_style = if form.can_submit() {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let hints = Line::from(vec![
        Span::styled(" Enter create ", submit_style),
        Span::styled(" Esc cancel ", Style::default().fg(Color::DarkGray)),
    ]);

    let block = Block::default()
        .title(" New incident ")
        .title_bottom(hints.centered())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    f.render_widget(Paragraph::new(lines).block(block), area);
}
