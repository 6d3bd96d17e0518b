//! Pure application state - data only, no I/O.

use std::time::{Duration, Instant};

use super::form::CreateForm;
use super::page::PageView;
use super::tentative::Tentative;
use crate::api::{Incident, IncidentId, ListQuery, Status};

/// How long a success notice stays on screen.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

/// Current screen being displayed.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    List,
    Create,
}

/// State of a row's cycle-status control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleControl {
    /// Terminal status; never offered.
    Hidden,
    /// A status request for this row is in flight.
    Disabled,
    /// Offered; moves the row to the contained status.
    Enabled(Status),
}

/// Transient success message.
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub shown_at: Instant,
}

/// Status change awaiting the server's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusEdit {
    /// Status to restore if the request fails
    pub prior: Status,
    /// Status the request asks for
    pub target: Status,
}

/// Record removed from the view while its DELETE is in flight.
#[derive(Debug, Clone)]
pub struct Removal {
    pub index: usize,
    pub incident: Incident,
    /// Page the row was removed from
    pub query: ListQuery,
}

/// Pure application state container.
#[derive(Debug)]
pub struct AppState {
    // === Navigation ===
    pub screen: Screen,

    // === List screen state ===
    pub view: PageView,
    /// Currently selected index in list
    pub selected_index: usize,
    /// Incident awaiting delete confirmation
    pub confirm_delete: Option<IncidentId>,

    // === Optimistic changes ===
    /// Rows with a status request in flight
    pub status_edits: Tentative<IncidentId, StatusEdit>,
    /// Rows removed pending a DELETE
    pub removals: Tentative<IncidentId, Removal>,

    // === Create form ===
    pub form: CreateForm,

    // === Loading state ===
    /// Whether a page load is in progress
    pub is_loading: bool,
    /// Generation of the most recent page load; older results are stale
    pub load_generation: u64,

    // === Notices ===
    /// Blocking error message, cleared by the user
    pub error: Option<String>,
    /// Auto-dismissing success message
    pub notice: Option<Notice>,

    // === Terminal info ===
    pub terminal_height: u16,

    // === Control ===
    pub should_quit: bool,
}

impl AppState {
    pub fn new(view: PageView) -> Self {
        Self {
            screen: Screen::List,
            view,
            selected_index: 0,
            confirm_delete: None,
            status_edits: Tentative::new(),
            removals: Tentative::new(),
            form: CreateForm::default(),
            is_loading: false,
            load_generation: 0,
            error: None,
            notice: None,
            terminal_height: 24,
            should_quit: false,
        }
    }

    pub fn set_terminal_height(&mut self, height: u16) {
        self.terminal_height = height;
    }

    /// Get half-page scroll amount (for Ctrl+D/U).
    pub fn half_page(&self) -> i32 {
        (self.terminal_height.saturating_sub(6) / 2).max(1) as i32
    }

    /// Clamp selected index to valid range.
    pub fn clamp_selection(&mut self) {
        let len = self.view.items.len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    pub fn selected(&self) -> Option<&Incident> {
        self.view.items.get(self.selected_index)
    }

    /// Cycle control for one row.
    pub fn cycle_control(&self, incident: &Incident) -> CycleControl {
        match incident.status.next() {
            None => CycleControl::Hidden,
            Some(_) if self.status_edits.is_pending(&incident.id) => CycleControl::Disabled,
            Some(next) => CycleControl::Enabled(next),
        }
    }

    pub fn show_notice(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            shown_at: Instant::now(),
        });
    }

    /// Drop the success notice once it has been visible long enough.
    pub fn prune_notice(&mut self, now: Instant) {
        if let Some(notice) = &self.notice {
            if now.duration_since(notice.shown_at) >= NOTICE_TTL {
                self.notice = None;
            }
        }
    }
}
