//! List screen rendering.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::api::{Incident, Status};
use crate::app::{App, AppState, CycleControl};
use crate::util::{format_created, truncate_str};

/// Draw the incident list screen.
pub fn draw_list(f: &mut Frame, app: &App, area: Rect) {
    let state = &app.state;
    let items: Vec<ListItem> = state
        .view
        .items
        .iter()
        .map(|incident| ListItem::new(row_line(state, incident)))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(title(state))
                .title_bottom(pager_line(state))
                .borders(Borders::ALL),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut list_state = ListState::default();
    if !state.view.items.is_empty() {
        list_state.select(Some(state.selected_index));
    }

    f.render_stateful_widget(list, area, &mut list_state);

    if state.view.items.is_empty() && !state.is_loading {
        let empty_area = Rect {
            x: area.x + 2,
            y: area.y + 1,
            width: area.width.saturating_sub(4),
            height: 1.min(area.height.saturating_sub(2)),
        };
        let empty = Paragraph::new("No incidents found.").style(Style::default().fg(Color::DarkGray));
        f.render_widget(empty, empty_area);
    }
}

/// One incident row: badge, title, location, created time, cycle hint.
fn row_line<'a>(state: &AppState, incident: &'a Incident) -> Line<'a> {
    let (icon, color) = status_icon_and_color(incident.status);

    let mut spans = vec![
        Span::styled(format!(" {} ", icon), Style::default().fg(color)),
        Span::styled(
            format!("{:12}", incident.status.label()),
            Style::default().fg(color),
        ),
        Span::styled(
            format!("#{:<5} ", incident.id.to_string()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(truncate_str(&incident.title, 40)),
        Span::styled(
            format!("  @ {}", truncate_str(&incident.location, 30)),
            Style::default().fg(Color::Gray),
        ),
    ];

    if let Some(created) = &incident.created_at {
        spans.push(Span::styled(
            format!("  {}", format_created(created)),
            Style::default().fg(Color::DarkGray),
        ));
    }

    match state.cycle_control(incident) {
        CycleControl::Enabled(next) => spans.push(Span::styled(
            format!("  → {}", next.label()),
            Style::default().fg(Color::Cyan),
        )),
        CycleControl::Disabled => spans.push(Span::styled(
            "  ◐ updating",
            Style::default().fg(Color::Yellow),
        )),
        CycleControl::Hidden => {}
    }

    Line::from(spans)
}

/// Header: page, visible vs total count, filter and shareable query.
fn title(state: &AppState) -> String {
    let view = &state.view;
    let filter = view.filter.map(Status::label).unwrap_or("All");
    let spinner = if state.is_loading { " ◐" } else { "" };
    let bookmark = view.bookmark();
    let bookmark = if bookmark.is_empty() {
        String::new()
    } else {
        format!(" · ?{}", bookmark)
    };
    format!(
        " Incidents{} · Page {} · Showing {} of {} · Filter: {}{} ",
        spinner,
        view.page,
        view.items.len(),
        view.total(),
        filter,
        bookmark,
    )
}

/// Pager controls, dimmed when there is nowhere to go.
fn pager_line(state: &AppState) -> Line<'static> {
    let style_for = |enabled: bool| {
        if enabled {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };
    Line::from(vec![
        Span::styled(" ◀ prev ", style_for(state.view.has_previous())),
        Span::raw("│"),
        Span::styled(" next ▶ ", style_for(state.view.has_next())),
    ])
    .centered()
}

/// Get status icon and color.
fn status_icon_and_color(status: Status) -> (&'static str, Color) {
    match status {
        Status::Open => ("○", Color::Red),
        Status::InProgress => ("◐", Color::Yellow),
        Status::Resolved => ("●", Color::Green),
    }
}
