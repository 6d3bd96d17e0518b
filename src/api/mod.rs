//! API client for the incidents REST resource.

mod types;

pub use types::*;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

/// Failure of a request against the incidents resource.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never reached the server, the response never arrived,
    /// or its body could not be decoded.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("server returned {status}: {body}")]
    Rejected {
        status: u16,
        body: serde_json::Value,
    },
    /// The task running the request ended without an answer.
    #[error("request aborted: {0}")]
    Aborted(String),
}

/// Operations the client needs from the incidents resource.
#[async_trait]
pub trait IncidentApi: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<Page, ApiError>;
    async fn create(&self, incident: &NewIncident) -> Result<Incident, ApiError>;
    /// Returns the server's echo of the record, or `None` for an empty body.
    async fn update_status(
        &self,
        id: &IncidentId,
        status: Status,
    ) -> Result<Option<IncidentPatch>, ApiError>;
    async fn delete(&self, id: &IncidentId) -> Result<(), ApiError>;
}

/// HTTP client for the incidents endpoint.
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// `base_url` points at the collection, e.g. `http://host/api/incidents/`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: normalize_base(base_url),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: &IncidentId) -> String {
        format!("{}{}/", self.base_url, id)
    }
}

#[async_trait]
impl IncidentApi for ApiClient {
    async fn list(&self, query: &ListQuery) -> Result<Page, ApiError> {
        debug!(url = %self.base_url, ?query, "GET incidents");
        let response = self
            .client
            .get(&self.base_url)
            .query(&query.to_pairs())
            .send()
            .await?;
        let response: ListResponse = ensure_success(response).await?.json().await?;
        Ok(response.into())
    }

    async fn create(&self, incident: &NewIncident) -> Result<Incident, ApiError> {
        debug!(title = %incident.title, "POST incident");
        let response = self.client.post(&self.base_url).json(incident).send().await?;
        let created = ensure_success(response).await?.json().await?;
        Ok(created)
    }

    async fn update_status(
        &self,
        id: &IncidentId,
        status: Status,
    ) -> Result<Option<IncidentPatch>, ApiError> {
        let url = self.item_url(id);
        debug!(%url, status = status.as_str(), "PATCH incident");
        let response = self
            .client
            .patch(&url)
            .json(&StatusUpdate { status })
            .send()
            .await?;
        let response = ensure_success(response).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = response.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        match serde_json::from_slice(&body) {
            Ok(patch) => Ok(Some(patch)),
            Err(e) => {
                warn!(%e, "Unparseable PATCH body, keeping optimistic status");
                Ok(None)
            }
        }
    }

    async fn delete(&self, id: &IncidentId) -> Result<(), ApiError> {
        let url = self.item_url(id);
        debug!(%url, "DELETE incident");
        let response = self.client.delete(&url).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}

/// Turn a non-2xx response into `ApiError::Rejected`, reading the body as
/// JSON if possible and falling back to an empty object.
async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .json::<serde_json::Value>()
        .await
        .unwrap_or_else(|_| serde_json::json!({}));
    warn!(status = status.as_u16(), %body, "Request rejected");
    Err(ApiError::Rejected {
        status: status.as_u16(),
        body,
    })
}

/// Collection URLs always end with a slash so item paths can be appended.
pub fn normalize_base(base_url: &str) -> String {
    let trimmed = base_url.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    }
}
