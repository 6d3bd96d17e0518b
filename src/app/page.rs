//! Page view-state: filter, page position and the rows of the current page.

use crate::api::{Incident, IncidentId, ListQuery, Page, Status};

pub const MAX_PAGE_SIZE: u32 = 100;

/// Current page of incidents plus the query that produced it.
#[derive(Debug, Clone, Default)]
pub struct PageView {
    pub filter: Option<Status>,
    /// 1-based page number.
    pub page: u32,
    /// `None` leaves the page size to the server.
    pub page_size: Option<u32>,
    pub items: Vec<Incident>,
    /// Server-reported total, if it sent one.
    pub count: Option<usize>,
    pub next: Option<String>,
    pub previous: Option<String>,
}

impl PageView {
    pub fn new(filter: Option<Status>, page_size: Option<u32>) -> Self {
        Self {
            filter,
            page: 1,
            page_size: page_size.map(clamp_page_size),
            ..Default::default()
        }
    }

    /// Query for `page` under the current filter and page size.
    pub fn query(&self, page: u32) -> ListQuery {
        ListQuery {
            status: self.filter,
            page: page.max(1),
            page_size: self.page_size,
        }
    }

    /// Replace the view with a freshly loaded page.
    pub fn apply(&mut self, page_number: u32, page: Page) {
        self.page = page_number.max(1);
        self.count = Some(page.count);
        self.items = page.items;
        self.next = page.next;
        self.previous = page.previous;
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Total for display; falls back to what is visible.
    pub fn total(&self) -> usize {
        self.count.unwrap_or(self.items.len())
    }

    /// Set the status filter. Returns the page to load, always the first.
    pub fn set_filter(&mut self, filter: Option<Status>) -> u32 {
        self.filter = filter;
        self.page = 1;
        1
    }

    /// Cycle All -> Open -> In Progress -> Resolved -> All (or backwards).
    pub fn cycle_filter(&mut self, forward: bool) -> u32 {
        let options: [Option<Status>; 4] = [
            None,
            Some(Status::Open),
            Some(Status::InProgress),
            Some(Status::Resolved),
        ];
        let current = options.iter().position(|f| *f == self.filter).unwrap_or(0);
        let next = if forward {
            (current + 1) % options.len()
        } else {
            (current + options.len() - 1) % options.len()
        };
        self.set_filter(options[next])
    }

    /// Adjust the page size by `delta`. Returns the page to load, always the first.
    pub fn adjust_page_size(&mut self, delta: i32, server_default: u32) -> u32 {
        let current = self.page_size.unwrap_or(server_default) as i32;
        self.page_size = Some(clamp_page_size((current + delta).max(1) as u32));
        self.page = 1;
        1
    }

    pub fn position(&self, id: &IncidentId) -> Option<usize> {
        self.items.iter().position(|i| &i.id == id)
    }

    pub fn get_mut(&mut self, id: &IncidentId) -> Option<&mut Incident> {
        self.items.iter_mut().find(|i| &i.id == id)
    }

    /// Shareable query mirroring the filter and page size.
    pub fn bookmark(&self) -> String {
        let mut parts = Vec::new();
        if let Some(status) = self.filter {
            parts.push(format!("status={}", status.as_str()));
        }
        if let Some(size) = self.page_size {
            parts.push(format!("page_size={}", size));
        }
        parts.join("&")
    }
}

pub fn clamp_page_size(size: u32) -> u32 {
    size.clamp(1, MAX_PAGE_SIZE)
}
