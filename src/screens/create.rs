//! Create form input handling.

use crossterm::event::{KeyCode, KeyEvent};
use crate::app::{App, FormField};
use super::Action;

/// Handle input on the create form.
pub fn handle_create_input(app: &App, key: KeyEvent) -> Action {
    let on_status = app.state.form.focus == FormField::Status;
    match key.code {
        KeyCode::Esc => Action::CloseCreate,
        KeyCode::Enter => Action::SubmitCreate,
        KeyCode::Tab | KeyCode::Down => Action::FormFocusNext,
        KeyCode::BackTab | KeyCode::Up => Action::FormFocusPrev,
        KeyCode::Backspace => Action::FormBackspace,
        KeyCode::Left if on_status => Action::FormCycleStatus(false),
        KeyCode::Right if on_status => Action::FormCycleStatus(true),
        KeyCode::Char(c) => Action::FormInput(c),
        _ => Action::None,
    }
}
