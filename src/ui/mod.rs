//! UI rendering with Ratatui.

mod form;
mod list;
mod overlay;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, CycleControl, Screen};

/// Main draw function - list underneath, modal layers on top.
pub fn draw(f: &mut Frame, app: &App) {
    // Create layout with main area, notice line and action bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Notice
            Constraint::Length(1), // Status/action bar
        ])
        .split(f.area());

    list::draw_list(f, app, chunks[0]);
    draw_notice(f, app, chunks[1]);
    draw_action_bar(f, app, chunks[2]);

    if *app.screen() == Screen::Create {
        form::draw_form(f, app);
    }
    if let Some(id) = &app.state.confirm_delete {
        overlay::draw_confirm(f, "Delete incident", &format!("Delete incident #{}?", id));
    }
    if let Some(error) = &app.state.error {
        overlay::draw_error(f, error);
    }
}

/// Draw the transient success notice.
fn draw_notice(f: &mut Frame, app: &App, area: Rect) {
    if let Some(notice) = &app.state.notice {
        let paragraph = Paragraph::new(format!(" ✓ {}", notice.text))
            .style(Style::default().fg(Color::Green));
        f.render_widget(paragraph, area);
    }
}

/// Draw the action bar at the bottom. Only controls that can act are shown.
fn draw_action_bar(f: &mut Frame, app: &App, area: Rect) {
    let keybinds: Vec<(&str, String)> = match app.screen() {
        Screen::List => {
            let mut binds = vec![("↑↓/jk", "navigate".to_string())];

            if let Some(incident) = app.state.selected() {
                if let CycleControl::Enabled(next) = app.state.cycle_control(incident) {
                    binds.push(("c", format!("→ {}", next.label())));
                }
                binds.push(("d", "delete".to_string()));
            }
            if app.state.view.has_previous() {
                binds.push(("p", "prev".to_string()));
            }
            if app.state.view.has_next() {
                binds.push(("n", "next".to_string()));
            }

            binds.extend([
                ("f", "filter".to_string()),
                ("+/-", "page size".to_string()),
                ("a", "add".to_string()),
                ("r", "reload".to_string()),
                ("q", "quit".to_string()),
            ]);
            binds
        }
        Screen::Create => {
            let mut binds = vec![("Tab", "next field".to_string())];
            if app.state.form.can_submit() {
                binds.push(("Enter", "create".to_string()));
            }
            binds.push(("Esc", "cancel".to_string()));
            binds
        }
    };

    let spans: Vec<Span> = keybinds
        .iter()
        .flat_map(|(key, desc)| {
            vec![
                Span::styled(format!("[{}]", key), Style::default().fg(Color::Cyan)),
                Span::raw(format!(" {} ", desc)),
            ]
        })
        .collect();

    let line = Line::from(spans);
    let paragraph = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));

    f.render_widget(paragraph, area);
}

/// Rectangle of the given size centered in `area`.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
