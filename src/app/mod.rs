//! Application state and coordination.
//!
//! The app module is split into:
//! - `state`: Pure data structures
//! - `page`: Page view-state and pagination
//! - `form`: Create form and validation
//! - `tentative`: Optimistic change ledger
//! - `background`: Async task management

mod background;
mod form;
mod page;
mod state;
mod tentative;

pub use background::{BackgroundMessage, BackgroundTasks};
pub use form::{CreateForm, FormField, ValidationError};
pub use page::{clamp_page_size, PageView, MAX_PAGE_SIZE};
pub use state::{AppState, CycleControl, Notice, Removal, Screen, StatusEdit, NOTICE_TTL};
pub use tentative::{InFlight, Tentative};

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::api::{ApiError, Incident, IncidentApi, IncidentId, IncidentPatch, Page, Status};
use crate::config::{DeleteRefresh, Settings, SERVER_PAGE_SIZE};
use crate::screens::Action;

/// Main application coordinator.
///
/// Holds the state and background task manager, provides high-level operations.
pub struct App {
    /// Pure application state
    pub state: AppState,
    /// Background task manager
    bg: BackgroundTasks,
    delete_refresh: DeleteRefresh,
}

impl App {
    pub fn new(settings: &Settings, client: Arc<dyn IncidentApi>) -> Self {
        Self {
            state: AppState::new(PageView::new(settings.filter, settings.page_size)),
            bg: BackgroundTasks::new(client),
            delete_refresh: settings.delete_refresh,
        }
    }

    // === Convenience accessors (delegate to state) ===

    pub fn screen(&self) -> &Screen {
        &self.state.screen
    }

    pub fn half_page(&self) -> i32 {
        self.state.half_page()
    }

    /// Number of requests still awaiting a response.
    pub fn in_flight(&self) -> usize {
        self.bg.in_flight()
    }

    // === Background task results ===

    /// Apply every finished background task. Call this from the main loop.
    pub fn poll_background(&mut self) {
        for msg in self.bg.poll() {
            self.handle_message(msg);
        }
    }

    /// Wait until every outstanding request has been answered and applied.
    pub async fn settle(&mut self) {
        while let Some(msg) = self.bg.recv().await {
            self.handle_message(msg);
        }
    }

    /// Periodic housekeeping.
    pub fn tick(&mut self, now: Instant) {
        self.state.prune_notice(now);
    }

    fn handle_message(&mut self, msg: BackgroundMessage) {
        match msg {
            BackgroundMessage::PageLoaded {
                generation,
                page,
                result,
            } => self.finish_page_load(generation, page, result),
            BackgroundMessage::StatusUpdated { id, result } => self.finish_status_cycle(id, result),
            BackgroundMessage::Deleted { id, result } => self.finish_delete(id, result),
            BackgroundMessage::Created(result) => self.finish_create(result),
        }
    }

    // === Action dispatch ===

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Quit => self.state.should_quit = true,
            Action::MoveSelection(delta) => self.move_selection(delta),
            Action::JumpToTop => self.state.selected_index = 0,
            Action::JumpToBottom => self.jump_to_bottom(),
            Action::Reload => self.reload(),
            Action::NextPage => self.next_page(),
            Action::PreviousPage => self.previous_page(),
            Action::CycleFilter(forward) => self.cycle_filter(forward),
            Action::ClearFilter => self.set_filter(None),
            Action::AdjustPageSize(delta) => self.adjust_page_size(delta),
            Action::CycleStatus => self.cycle_selected_status(),
            Action::RequestDelete => self.request_delete(),
            Action::ConfirmDelete => self.confirm_delete(),
            Action::CancelDelete => self.state.confirm_delete = None,
            Action::OpenCreate => self.open_create(),
            Action::CloseCreate => self.close_create(),
            Action::FormInput(c) => self.state.form.insert_char(c),
            Action::FormBackspace => self.state.form.backspace(),
            Action::FormFocusNext => self.state.form.focus_next(),
            Action::FormFocusPrev => self.state.form.focus_prev(),
            Action::FormCycleStatus(forward) => self.state.form.cycle_status(forward),
            Action::SubmitCreate => self.submit_create(),
            Action::DismissError => self.state.error = None,
        }
    }

    // === Loading ===

    /// Load `page` under the current filter. Supersedes any older load.
    pub fn load_page(&mut self, page: u32) {
        self.state.load_generation += 1;
        self.state.is_loading = true;
        let query = self.state.view.query(page);
        self.bg.spawn_page_load(self.state.load_generation, query);
    }

    /// Reload the page currently shown.
    pub fn reload(&mut self) {
        self.load_page(self.state.view.page);
    }

    fn finish_page_load(&mut self, generation: u64, page: u32, result: Result<Page, ApiError>) {
        if generation != self.state.load_generation {
            debug!(generation, current = self.state.load_generation, "Dropping stale page");
            return;
        }
        self.state.is_loading = false;

        match result {
            Ok(mut loaded) => {
                let removals = &self.state.removals;
                loaded.items.retain(|i| !removals.is_pending(&i.id));
                // Rows with a status request in flight keep showing the target.
                for item in &mut loaded.items {
                    if let Some(edit) = self.state.status_edits.get_mut(&item.id) {
                        edit.prior = item.status;
                        item.status = edit.target;
                    }
                }
                self.state.view.apply(page, loaded);
                self.state.clamp_selection();
            }
            Err(e) => {
                warn!(%e, page, "Page load failed");
                self.state.error = Some(format!("Load failed: {}", e));
            }
        }
    }

    // === Pagination & filtering ===

    pub fn next_page(&mut self) {
        if self.state.view.has_next() {
            self.state.selected_index = 0;
            self.load_page(self.state.view.page + 1);
        }
    }

    pub fn previous_page(&mut self) {
        if self.state.view.has_previous() {
            self.state.selected_index = 0;
            self.load_page(self.state.view.page.saturating_sub(1).max(1));
        }
    }

    pub fn set_filter(&mut self, filter: Option<Status>) {
        let page = self.state.view.set_filter(filter);
        self.state.selected_index = 0;
        self.load_page(page);
    }

    pub fn cycle_filter(&mut self, forward: bool) {
        let page = self.state.view.cycle_filter(forward);
        self.state.selected_index = 0;
        self.load_page(page);
    }

    pub fn adjust_page_size(&mut self, delta: i32) {
        let page = self.state.view.adjust_page_size(delta, SERVER_PAGE_SIZE);
        self.state.selected_index = 0;
        self.load_page(page);
    }

    // === Navigation ===

    /// Move selection by delta (positive = down, negative = up).
    pub fn move_selection(&mut self, delta: i32) {
        let len = self.state.view.items.len();
        if len == 0 {
            return;
        }

        let new_index = self.state.selected_index as i32 + delta;
        self.state.selected_index = new_index.clamp(0, len as i32 - 1) as usize;
    }

    pub fn jump_to_bottom(&mut self) {
        if !self.state.view.items.is_empty() {
            self.state.selected_index = self.state.view.items.len() - 1;
        }
    }

    // === Status cycle ===

    /// Move the selected incident to its successor status.
    pub fn cycle_selected_status(&mut self) {
        let Some(id) = self.state.selected().map(|i| i.id.clone()) else {
            return;
        };
        self.cycle_status(&id);
    }

    /// Optimistically advance `id` and send the update. Does nothing when the
    /// control is hidden or already disabled.
    pub fn cycle_status(&mut self, id: &IncidentId) {
        let Some(incident) = self.state.view.items.iter().find(|i| &i.id == id) else {
            return;
        };
        let CycleControl::Enabled(next) = self.state.cycle_control(incident) else {
            return;
        };
        let prior = incident.status;

        let edit = StatusEdit { prior, target: next };
        if self.state.status_edits.begin(id.clone(), edit).is_err() {
            return;
        }
        if let Some(row) = self.state.view.get_mut(id) {
            row.status = next;
        }
        debug!(%id, from = prior.as_str(), to = next.as_str(), "Cycling status");
        self.bg.spawn_status_update(id.clone(), next);
    }

    fn finish_status_cycle(&mut self, id: IncidentId, result: Result<Option<IncidentPatch>, ApiError>) {
        match result {
            Ok(patch) => {
                let target = self.state.status_edits.get_mut(&id).map(|edit| edit.target);
                self.state.status_edits.confirm(&id);
                if let Some(row) = self.state.view.get_mut(&id) {
                    if let Some(target) = target {
                        row.status = target;
                    }
                    if let Some(patch) = patch {
                        row.merge(patch);
                    }
                }
                self.state.show_notice("Incident status updated");
            }
            Err(e) => {
                if let Some(edit) = self.state.status_edits.revert(&id) {
                    warn!(%id, %e, "Status update failed, restoring {}", edit.prior.as_str());
                    if let Some(row) = self.state.view.get_mut(&id) {
                        row.status = edit.prior;
                    }
                }
                self.state.error = Some(format!("Update failed: {}", e));
            }
        }
    }

    // === Delete ===

    /// Ask for confirmation before deleting the selected incident.
    pub fn request_delete(&mut self) {
        if let Some(incident) = self.state.selected() {
            self.state.confirm_delete = Some(incident.id.clone());
        }
    }

    /// Delete the incident awaiting confirmation.
    pub fn confirm_delete(&mut self) {
        if let Some(id) = self.state.confirm_delete.take() {
            self.delete(&id);
        }
    }

    /// Optimistically remove `id` from the view and send the delete.
    pub fn delete(&mut self, id: &IncidentId) {
        let Some(index) = self.state.view.position(id) else {
            return;
        };
        let view = &self.state.view;
        let removal = Removal {
            index,
            incident: view.items[index].clone(),
            query: view.query(view.page),
        };
        if self.state.removals.begin(id.clone(), removal).is_err() {
            return;
        }

        self.state.view.items.remove(index);
        self.state.clamp_selection();
        debug!(%id, "Deleting incident");
        self.bg.spawn_delete(id.clone());
    }

    fn finish_delete(&mut self, id: IncidentId, result: Result<(), ApiError>) {
        match result {
            Ok(()) => {
                self.state.removals.confirm(&id);
                self.state.show_notice("Incident deleted");
                match self.delete_refresh {
                    DeleteRefresh::Reload => {
                        let view = &self.state.view;
                        let page = if view.items.is_empty() && view.page > 1 {
                            view.page - 1
                        } else {
                            view.page
                        };
                        self.load_page(page);
                    }
                    DeleteRefresh::InPlace => {
                        if let Some(count) = self.state.view.count.as_mut() {
                            *count = count.saturating_sub(1);
                        }
                    }
                }
            }
            Err(e) => {
                if let Some(removal) = self.state.removals.revert(&id) {
                    warn!(%id, %e, "Delete failed, restoring row");
                    self.restore(removal);
                }
                self.state.error = Some(format!("Delete failed: {}", e));
            }
        }
    }

    /// Put a row back after its DELETE failed. A view that has since moved
    /// to another page or filter is reloaded instead.
    fn restore(&mut self, removal: Removal) {
        let view = &self.state.view;
        if view.query(view.page) != removal.query {
            debug!(id = %removal.incident.id, "View changed since removal, reloading");
            self.reload();
            return;
        }
        let items = &mut self.state.view.items;
        if items.iter().any(|i| i.id == removal.incident.id) {
            return;
        }
        match self.delete_refresh {
            DeleteRefresh::Reload => {
                let index = removal.index.min(items.len());
                items.insert(index, removal.incident);
            }
            DeleteRefresh::InPlace => {
                items.push(removal.incident);
                items.sort_by(|a, b| a.id.cmp(&b.id));
            }
        }
    }

    // === Create ===

    pub fn open_create(&mut self) {
        self.state.screen = Screen::Create;
    }

    /// Close the form and discard its contents.
    pub fn close_create(&mut self) {
        if self.state.form.submitting {
            return;
        }
        self.state.form = CreateForm::default();
        self.state.screen = Screen::List;
    }

    /// Validate the form and send the create. Invalid input never reaches
    /// the network.
    pub fn submit_create(&mut self) {
        if self.state.form.submitting {
            return;
        }
        match self.state.form.validate() {
            Ok(incident) => {
                self.state.form.error = None;
                self.state.form.submitting = true;
                self.bg.spawn_create(incident);
            }
            Err(e) => {
                self.state.form.error = Some(e);
            }
        }
    }

    fn finish_create(&mut self, result: Result<Incident, ApiError>) {
        self.state.form.submitting = false;
        match result {
            Ok(created) => {
                info!(id = %created.id, "Incident created");
                self.close_create();
                self.state.selected_index = 0;
                self.load_page(1);
                self.state.show_notice("Incident created");
            }
            Err(e) => {
                warn!(%e, "Create failed");
                self.state.error = Some(format!("Create failed: {}", e));
            }
        }
    }
}
