//! List screen input handling.

use crossterm::event::{KeyCode, KeyEvent};
use super::Action;

/// Handle input on the list screen.
pub fn handle_list_input(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveSelection(1),
        KeyCode::Char('k') | KeyCode::Up => Action::MoveSelection(-1),
        KeyCode::Char('g') => Action::JumpToTop,
        KeyCode::Char('G') => Action::JumpToBottom,
        KeyCode::Char('r') => Action::Reload,
        KeyCode::Char('n') | KeyCode::Char('l') | KeyCode::Right => Action::NextPage,
        KeyCode::Char('p') | KeyCode::Char('h') | KeyCode::Left => Action::PreviousPage,
        KeyCode::Char('f') => Action::CycleFilter(true),
        KeyCode::Char('F') => Action::CycleFilter(false),
        KeyCode::Char('0') => Action::ClearFilter,
        KeyCode::Char('+') | KeyCode::Char('=') => Action::AdjustPageSize(5),
        KeyCode::Char('-') => Action::AdjustPageSize(-5),
        KeyCode::Char('c') | KeyCode::Char(' ') => Action::CycleStatus,
        KeyCode::Char('d') | KeyCode::Delete => Action::RequestDelete,
        KeyCode::Char('a') => Action::OpenCreate,
        _ => Action::None,
    }
}

/// Handle input while the delete confirmation is shown.
pub fn handle_confirm_input(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => Action::ConfirmDelete,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::CancelDelete,
        _ => Action::None,
    }
}
