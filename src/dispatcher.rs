use crate::args;
use crate::record::LogRecord;
use crate::sink::LocalSink;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Header carrying the static collector credential.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Asynchronous destination for batches drained from the
/// [`crate::queue::BatchQueue`].
///
/// The queue calls `send_batch` from a background task and never awaits
/// it on the application thread. Implementations absorb their own
/// failures; a batch handed over is never returned to the queue.
#[async_trait]
pub trait BatchSink: Send + Sync {
    async fn send_batch(&self, batch: Vec<LogRecord>);
}

#[derive(thiserror::Error, Debug)]
pub enum DispatchError {
    #[error("failed to encode batch: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to reach collector: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("collector returned status {0}")]
    Status(StatusCode),
}

/// [`BatchSink`] that POSTs each batch as one JSON array.
#[derive(Clone)]
pub struct HttpDispatcher {
    client: Client,
    url: String,
    api_key: Option<String>,
    reachable: Arc<AtomicBool>,
    local: Arc<dyn LocalSink>,
}

impl HttpDispatcher {
    /// **Parameters**
    /// - `client`: shared HTTP client; its timeout bounds each request.
    /// - `url`: full dispatch URL (`base + dispatch_endpoint`).
    /// - `api_key`: sent as `X-API-Key` when present and non-empty.
    /// - `reachable`: lowered on transport failures.
    /// - `local`: receives warnings and errors about failed sends.
    pub fn new(
        client: Client,
        url: impl Into<String>,
        api_key: Option<String>,
        reachable: Arc<AtomicBool>,
        local: Arc<dyn LocalSink>,
    ) -> Self {
        Self {
            client,
            url: url.into(),
            api_key: api_key.filter(|k| !k.is_empty()),
            reachable,
            local,
        }
    }

    fn prepare(&self, batch: &[LogRecord]) -> Result<reqwest::RequestBuilder, DispatchError> {
        let body = serde_json::to_vec(batch)?;

        let mut req = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        if let Some(key) = &self.api_key {
            req = req.header(API_KEY_HEADER, key.as_str());
        }
        Ok(req)
    }

    /// Send one batch and report how it went.
    ///
    /// Only a transport failure lowers the reachability flag; a success
    /// never raises it again, that is left to the health monitor.
    pub async fn try_send(&self, batch: &[LogRecord]) -> Result<(), DispatchError> {
        let req = self.prepare(batch)?;

        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(e) => {
                self.reachable.store(false, Ordering::Relaxed);
                return Err(DispatchError::Transport(e));
            }
        };

        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(DispatchError::Status(status))
        }
    }
}

#[async_trait]
impl BatchSink for HttpDispatcher {
    async fn send_batch(&self, batch: Vec<LogRecord>) {
        match self.try_send(&batch).await {
            Ok(()) => {}
            Err(DispatchError::Encode(e)) => {
                self.local
                    .error("failed to marshal batch to JSON", &args!["error" => e.to_string()]);
            }
            Err(DispatchError::Transport(e)) => {
                self.local
                    .warn("failed to send batch to dispatcher", &args!["error" => e.to_string()]);
            }
            Err(DispatchError::Status(status)) => {
                self.local.warn(
                    "dispatcher returned unexpected status",
                    &args!["code" => status.as_u16(), "dropped" => batch.len()],
                );
            }
        }
    }
}
