//! Background task management - spawning async requests and receiving results.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::api::{
    ApiError, Incident, IncidentApi, IncidentId, IncidentPatch, ListQuery, NewIncident, Page,
    Status,
};

/// Messages from background tasks. Every spawned task sends exactly one.
#[derive(Debug)]
pub enum BackgroundMessage {
    PageLoaded {
        generation: u64,
        page: u32,
        result: Result<Page, ApiError>,
    },
    StatusUpdated {
        id: IncidentId,
        result: Result<Option<IncidentPatch>, ApiError>,
    },
    Deleted {
        id: IncidentId,
        result: Result<(), ApiError>,
    },
    Created(Result<Incident, ApiError>),
}

/// Manages background task communication.
pub struct BackgroundTasks {
    /// API used by spawned tasks
    client: Arc<dyn IncidentApi>,
    /// Channel receiver for background task results
    rx: mpsc::Receiver<BackgroundMessage>,
    /// Channel sender for background tasks (cloned into spawned tasks)
    tx: mpsc::Sender<BackgroundMessage>,
    /// Tasks spawned whose message has not been received yet
    in_flight: usize,
}

impl BackgroundTasks {
    pub fn new(client: Arc<dyn IncidentApi>) -> Self {
        let (tx, rx) = mpsc::channel(64);
        Self {
            client,
            rx,
            tx,
            in_flight: 0,
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Drain all messages that are ready without waiting.
    pub fn poll(&mut self) -> Vec<BackgroundMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            messages.push(msg);
        }
        messages
    }

    /// Wait for the next message. Returns `None` when nothing is in flight.
    pub async fn recv(&mut self) -> Option<BackgroundMessage> {
        if self.in_flight == 0 {
            return None;
        }
        let msg = self.rx.recv().await?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(msg)
    }

    /// Run `work` on its own task and forward its message. If that task
    /// panics, the message from `on_abort` is sent in its place.
    fn spawn<W, A>(&mut self, work: W, on_abort: A)
    where
        W: Future<Output = BackgroundMessage> + Send + 'static,
        A: FnOnce(ApiError) -> BackgroundMessage + Send + 'static,
    {
        let tx = self.tx.clone();
        self.in_flight += 1;

        tokio::spawn(async move {
            let msg = match tokio::spawn(work).await {
                Ok(msg) => msg,
                Err(e) => {
                    warn!(%e, "Background task ended without a result");
                    on_abort(ApiError::Aborted(e.to_string()))
                }
            };
            let _ = tx.send(msg).await;
        });
    }

    pub fn spawn_page_load(&mut self, generation: u64, query: ListQuery) {
        let client = Arc::clone(&self.client);
        let page = query.page;

        self.spawn(
            async move {
                debug!(generation, page, "Loading page");
                let result = client.list(&query).await;
                BackgroundMessage::PageLoaded {
                    generation,
                    page,
                    result,
                }
            },
            move |e| BackgroundMessage::PageLoaded {
                generation,
                page,
                result: Err(e),
            },
        );
    }

    pub fn spawn_status_update(&mut self, id: IncidentId, status: Status) {
        let client = Arc::clone(&self.client);
        let aborted_id = id.clone();

        self.spawn(
            async move {
                let result = client.update_status(&id, status).await;
                BackgroundMessage::StatusUpdated { id, result }
            },
            move |e| BackgroundMessage::StatusUpdated {
                id: aborted_id,
                result: Err(e),
            },
        );
    }

    pub fn spawn_delete(&mut self, id: IncidentId) {
        let client = Arc::clone(&self.client);
        let aborted_id = id.clone();

        self.spawn(
            async move {
                let result = client.delete(&id).await;
                BackgroundMessage::Deleted { id, result }
            },
            move |e| BackgroundMessage::Deleted {
                id: aborted_id,
                result: Err(e),
            },
        );
    }

    pub fn spawn_create(&mut self, incident: NewIncident) {
        let client = Arc::clone(&self.client);

        self.spawn(
            async move {
                let result = client.create(&incident).await;
                BackgroundMessage::Created(result)
            },
            |e| BackgroundMessage::Created(Err(e)),
        );
    }
}
