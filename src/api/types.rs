//! API types matching the incidents REST contract.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Status
// =============================================================================

/// Workflow state of an incident. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Open,
    InProgress,
    Resolved,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Open, Status::InProgress, Status::Resolved];

    /// The only status this one may move to, if any.
    pub fn next(self) -> Option<Status> {
        match self {
            Status::Open => Some(Status::InProgress),
            Status::InProgress => Some(Status::Resolved),
            Status::Resolved => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Status::Open => "Open",
            Status::InProgress => "In Progress",
            Status::Resolved => "Resolved",
        }
    }

    /// Wire value, as used in JSON bodies and query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Open => "open",
            Status::InProgress => "in_progress",
            Status::Resolved => "resolved",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status '{0}' (expected open, in_progress or resolved)")]
pub struct UnknownStatus(pub String);

impl FromStr for Status {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Status::Open),
            "in_progress" | "in-progress" => Ok(Status::InProgress),
            "resolved" => Ok(Status::Resolved),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

// =============================================================================
// Incident
// =============================================================================

/// Opaque server identifier. Numbers order before strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IncidentId {
    Number(i64),
    Text(String),
}

impl fmt::Display for IncidentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncidentId::Number(n) => write!(f, "{}", n),
            IncidentId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for IncidentId {
    fn from(n: i64) -> Self {
        IncidentId::Number(n)
    }
}

impl From<&str> for IncidentId {
    fn from(s: &str) -> Self {
        IncidentId::Text(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Incident {
    pub id: IncidentId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    pub status: Status,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Incident {
    /// Overlay whatever fields the server echoed back.
    pub fn merge(&mut self, patch: IncidentPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(created_at) = patch.created_at {
            self.created_at = Some(created_at);
        }
    }
}

/// Partial record returned by a PATCH. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct IncidentPatch {
    pub title: Option<String>,
    pub location: Option<String>,
    pub status: Option<Status>,
    pub created_at: Option<String>,
}

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewIncident {
    pub title: String,
    pub location: String,
    pub status: Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusUpdate {
    pub status: Status,
}

/// Query for one page of the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub status: Option<Status>,
    pub page: u32,
    pub page_size: Option<u32>,
}

impl ListQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        pairs.push(("page", self.page.to_string()));
        if let Some(size) = self.page_size {
            pairs.push(("page_size", size.to_string()));
        }
        pairs
    }
}

// =============================================================================
// List response
// =============================================================================

/// The list endpoint answers with either a bare array or a paginated envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse {
    Bare(Vec<Incident>),
    Envelope(Envelope),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub results: Vec<Incident>,
    pub count: Option<usize>,
    pub next: Option<String>,
    pub previous: Option<String>,
}

/// One page of incidents, independent of the response shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub items: Vec<Incident>,
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
}

impl From<ListResponse> for Page {
    fn from(response: ListResponse) -> Self {
        match response {
            ListResponse::Bare(items) => Page {
                count: items.len(),
                items,
                next: None,
                previous: None,
            },
            ListResponse::Envelope(env) => Page {
                count: env.count.unwrap_or(env.results.len()),
                items: env.results,
                next: env.next,
                previous: env.previous,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_successor_mapping() {
        assert_eq!(Status::Open.next(), Some(Status::InProgress));
        assert_eq!(Status::InProgress.next(), Some(Status::Resolved));
        assert_eq!(Status::Resolved.next(), None);
        assert!(Status::Resolved.is_terminal());
        assert!(!Status::Open.is_terminal());
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("in_progress".parse::<Status>(), Ok(Status::InProgress));
        assert_eq!(" RESOLVED ".parse::<Status>(), Ok(Status::Resolved));
        assert!("closed".parse::<Status>().is_err());
    }

    #[test]
    fn test_id_ordering_numbers_first() {
        let mut ids = vec![
            IncidentId::from("b"),
            IncidentId::Number(10),
            IncidentId::from("a"),
            IncidentId::Number(2),
        ];
        ids.sort();
        assert_eq!(
            ids,
            vec![
                IncidentId::Number(2),
                IncidentId::Number(10),
                IncidentId::from("a"),
                IncidentId::from("b"),
            ]
        );
    }

    #[test]
    fn test_query_pairs_skip_unset() {
        let query = ListQuery { status: None, page: 3, page_size: None };
        assert_eq!(query.to_pairs(), vec![("page", "3".to_string())]);

        let query = ListQuery { status: Some(Status::Open), page: 1, page_size: Some(5) };
        assert_eq!(
            query.to_pairs(),
            vec![
                ("status", "open".to_string()),
                ("page", "1".to_string()),
                ("page_size", "5".to_string()),
            ]
        );
    }

    #[test]
    fn test_envelope_without_count_uses_visible_count() {
        let response: ListResponse = serde_json::from_str(
            r#"{"results":[{"id":1,"title":"a","location":"b","status":"open"}],"next":null,"previous":null}"#,
        )
        .unwrap();
        let page = Page::from(response);
        assert_eq!(page.count, 1);
    }

    #[test]
    fn test_merge_keeps_unsent_fields() {
        let mut incident = Incident {
            id: IncidentId::Number(1),
            title: "Flood".to_string(),
            location: "Main St".to_string(),
            status: Status::Open,
            created_at: None,
        };
        incident.merge(IncidentPatch { status: Some(Status::InProgress), ..Default::default() });
        assert_eq!(incident.status, Status::InProgress);
        assert_eq!(incident.title, "Flood");
    }
}
