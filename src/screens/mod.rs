//! Screen-specific input handling.
//!
//! Each screen module defines its keybindings and returns an Action.

mod create;
mod list;

pub use create::handle_create_input;
pub use list::{handle_confirm_input, handle_list_input};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crate::app::{App, Screen};

/// Actions that can be performed by the application.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No action needed
    None,
    /// Quit the application
    Quit,
    /// Navigation
    MoveSelection(i32),
    JumpToTop,
    JumpToBottom,
    /// Paging and filtering
    Reload,
    NextPage,
    PreviousPage,
    CycleFilter(bool),
    ClearFilter,
    AdjustPageSize(i32),
    /// Row actions
    CycleStatus,
    RequestDelete,
    ConfirmDelete,
    CancelDelete,
    /// Create form
    OpenCreate,
    CloseCreate,
    FormInput(char),
    FormBackspace,
    FormFocusNext,
    FormFocusPrev,
    FormCycleStatus(bool),
    SubmitCreate,
    /// Notices
    DismissError,
}

/// Route input to the appropriate handler. Overlays take precedence over
/// the screen underneath.
pub fn handle_input(app: &App, key: KeyEvent) -> Action {
    if app.state.error.is_some() {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => Action::DismissError,
            _ => Action::None,
        };
    }

    if app.state.confirm_delete.is_some() {
        return handle_confirm_input(key);
    }

    // Handle Ctrl+D/U for half-page movement on the list
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match (app.screen(), key.code) {
            (Screen::List, KeyCode::Char('d')) => return Action::MoveSelection(app.half_page()),
            (Screen::List, KeyCode::Char('u')) => return Action::MoveSelection(-app.half_page()),
            (_, KeyCode::Char('c')) => return Action::Quit,
            _ => {}
        }
    }

    match app.screen() {
        Screen::List => handle_list_input(key),
        Screen::Create => handle_create_input(app, key),
    }
}
