//! Utility functions for text processing.

use chrono::DateTime;

/// Truncate a string to max length with ellipsis.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

/// Format an RFC 3339 timestamp as e.g. `August 27, 2025 3:04 PM`.
/// Anything unparseable is returned as-is.
pub fn format_created(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts.format("%B %-d, %Y %-I:%M %p").to_string(),
        Err(_) => raw.to_string(),
    }
}
