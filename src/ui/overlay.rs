//! Modal overlays: delete confirmation and blocking error.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn draw_confirm(f: &mut Frame, title: &str, message: &str) {
    let area = super::centered(f.area(), 40, 7);
    f.render_widget(Clear, area);

    let hints = Line::from(vec![
        Span::styled(
            "y",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" confirm   ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" cancel ", Style::default().fg(Color::DarkGray)),
    ]);

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_bottom(hints.centered())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let message = Line::from(Span::styled(message, Style::default().fg(Color::White)));
    let paragraph = Paragraph::new(vec![Line::from(""), message, Line::from("")])
        .block(block)
        .centered();
    f.render_widget(paragraph, area);
}

pub fn draw_error(f: &mut Frame, error: &str) {
    let area = super::centered(f.area(), 60, 8);
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(" Error ")
        .title_bottom(Line::from(" Enter dismiss ").centered())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .style(Style::default().bg(Color::Black));

    let paragraph = Paragraph::new(vec![
        Line::default(),
        Line::from(Span::styled(error, Style::default().fg(Color::Red))),
    ])
    .block(block)
    .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
