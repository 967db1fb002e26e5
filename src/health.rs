use reqwest::Client;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Probes the remote collector and publishes the result on a shared
/// reachability flag.
///
/// The flag is best-effort: the dispatcher may lower it concurrently and
/// readers may observe a stale value. Neither case affects correctness,
/// only whether a record is shipped or kept local.
#[derive(Clone, Debug)]
pub struct HealthMonitor {
    client: Client,
    url: String,
    reachable: Arc<AtomicBool>,
}

impl HealthMonitor {
    /// **Parameters**
    /// - `client`: shared HTTP client; its timeout bounds each probe.
    /// - `url`: full health URL (`base + health_endpoint`).
    /// - `reachable`: flag overwritten after every probe.
    pub fn new(client: Client, url: impl Into<String>, reachable: Arc<AtomicBool>) -> Self {
        Self {
            client,
            url: url.into(),
            reachable,
        }
    }

    /// GET the health URL. Returns `true` iff the request completed with a
    /// 2xx status. Transport errors and other statuses yield `false`.
    pub async fn probe(&self) -> bool {
        let ok = match self.client.get(&self.url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        };
        self.reachable.store(ok, Ordering::Relaxed);
        ok
    }

    pub fn is_reachable(&self) -> bool {
        self.reachable.load(Ordering::Relaxed)
    }

    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.reachable)
    }
}
