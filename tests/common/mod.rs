#![allow(dead_code)]

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing_log_relay::value::flatten_args;
use tracing_log_relay::{Arg, Level, LocalSink};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// One write observed by [`MemorySink`].
#[derive(Debug, Clone)]
pub struct Entry {
    pub level: Level,
    pub msg: String,
    pub args: BTreeMap<String, String>,
}

/// Local sink that keeps every write in memory. Derived sinks share the
/// same entry list.
#[derive(Clone, Default)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<Entry>>>,
    context: Vec<Arg>,
}

impl MemorySink {
    pub fn entries(&self) -> Vec<Entry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn contains(&self, level: Level, msg: &str) -> bool {
        self.entries()
            .iter()
            .any(|e| e.level == level && e.msg == msg)
    }

    fn push(&self, level: Level, msg: &str, args: &[Arg]) {
        let mut all = self.context.clone();
        all.extend_from_slice(args);
        self.entries.lock().unwrap().push(Entry {
            level,
            msg: msg.to_string(),
            args: flatten_args(&all),
        });
    }
}

impl LocalSink for MemorySink {
    fn debug(&self, msg: &str, args: &[Arg]) {
        self.push(Level::Debug, msg, args);
    }

    fn info(&self, msg: &str, args: &[Arg]) {
        self.push(Level::Info, msg, args);
    }

    fn warn(&self, msg: &str, args: &[Arg]) {
        self.push(Level::Warn, msg, args);
    }

    fn error(&self, msg: &str, args: &[Arg]) {
        self.push(Level::Error, msg, args);
    }

    fn enabled(&self, _level: Level) -> bool {
        true
    }

    fn with(&self, args: &[Arg]) -> Arc<dyn LocalSink> {
        let mut derived = self.clone();
        derived.context.extend_from_slice(args);
        Arc::new(derived)
    }

    fn with_group(&self, _name: &str) -> Arc<dyn LocalSink> {
        Arc::new(self.clone())
    }
}

/// Start a collector whose `/health` answers with `health_status` and
/// whose `/api/log` accepts batches with `dispatch_status`.
pub async fn collector(health_status: u16, dispatch_status: u16) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(health_status))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/log"))
        .respond_with(ResponseTemplate::new(dispatch_status))
        .mount(&server)
        .await;

    server
}

/// Every POST the collector has received so far.
pub async fn posted_batches(server: &MockServer) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.method.as_str() == "POST")
        .collect()
}

/// Parse a POSTed body into its array of records.
pub fn batch_body(request: &Request) -> Vec<serde_json::Value> {
    serde_json::from_slice(&request.body).expect("batch is a JSON array")
}

/// Poll `check` until it yields true or `timeout` elapses.
pub async fn eventually<F, Fut>(timeout: Duration, mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if check().await {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}
