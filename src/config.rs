//! Runtime settings assembled from command-line arguments.

use anyhow::{anyhow, Result};
use reqwest::Url;
use std::time::Duration;

use crate::api::Status;
use crate::app::clamp_page_size;

pub const DEFAULT_SERVER: &str = "http://localhost:8000/api/incidents/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Page size the server uses when none is requested.
pub const SERVER_PAGE_SIZE: u32 = 10;

/// What to do with the list after a delete succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DeleteRefresh {
    /// Reload the current page so counts and pagination stay consistent.
    #[default]
    Reload,
    /// Keep the local removal without another request.
    InPlace,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Collection URL without query, ending in `/`.
    pub base_url: String,
    pub filter: Option<Status>,
    pub page_size: Option<u32>,
    pub timeout: Duration,
    pub delete_refresh: DeleteRefresh,
}

impl Settings {
    /// Build settings from a server URL that may carry `status` and
    /// `page_size` query parameters. Explicit values take precedence.
    pub fn from_url(
        server: &str,
        status: Option<Status>,
        page_size: Option<u32>,
        timeout_secs: u64,
        delete_refresh: DeleteRefresh,
    ) -> Result<Self> {
        let mut url = Url::parse(server.trim())
            .map_err(|e| anyhow!("Invalid server URL '{}': {}", server, e))?;

        let mut url_status = None;
        let mut url_page_size = None;
        for (key, value) in url.query_pairs() {
            match &*key {
                "status" if !value.is_empty() => url_status = Some(value.parse::<Status>()?),
                "page_size" if !value.is_empty() => {
                    let size = value
                        .parse::<u32>()
                        .map_err(|e| anyhow!("Invalid page_size '{}': {}", value, e))?;
                    url_page_size = Some(size);
                }
                _ => {}
            }
        }
        url.set_query(None);
        url.set_fragment(None);

        Ok(Self {
            base_url: crate::api::normalize_base(url.as_str()),
            filter: status.or(url_status),
            page_size: page_size.or(url_page_size).map(clamp_page_size),
            timeout: Duration::from_secs(timeout_secs.max(1)),
            delete_refresh,
        })
    }
}
