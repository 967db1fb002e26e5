use crate::config::Options;
use crate::dispatcher::{BatchSink, HttpDispatcher};
use crate::health::HealthMonitor;
use crate::queue::BatchQueue;
use crate::record::{Level, LogRecord};
use crate::scheduler::Scheduler;
use crate::sink::LocalSink;
use crate::value::{flatten_args, Arg};
use reqwest::Client;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;

struct Shared {
    opts: Options,
    reachable: Arc<AtomicBool>,
    queue: Arc<BatchQueue>,
    scheduler: Option<Scheduler>,
}

/// Logger that writes every call to a [`LocalSink`] and mirrors eligible
/// records to a remote collector in batches.
///
/// Logging calls never fail and never wait on the network. Cloning, as
/// well as [`Logger::with`] and [`Logger::with_group`], yields handles
/// that share one queue, one reachability flag and one set of timers.
#[derive(Clone)]
pub struct Logger {
    local: Arc<dyn LocalSink>,
    shared: Arc<Shared>,
}

impl Logger {
    /// Build a logger and probe the collector once before returning.
    ///
    /// If the probe fails (or `opts.url` is empty) remote dispatch is
    /// disabled for the whole lifetime of this logger and no timers are
    /// started; local writes are unaffected.
    ///
    /// Must be called from within a Tokio runtime: background flushes are
    /// spawned on the runtime that was current here.
    pub async fn new(local: Arc<dyn LocalSink>, opts: Options) -> Self {
        let opts = opts.normalized();
        let handle = Handle::current();
        let reachable = Arc::new(AtomicBool::new(false));

        let client = match Client::builder().timeout(opts.request_timeout).build() {
            Ok(client) => client,
            Err(e) => {
                local.error(
                    "failed to build HTTP client, using local logger only",
                    &crate::args!["error" => e.to_string()],
                );
                return Self::local_only(local, opts, reachable, handle);
            }
        };

        let health_url = format!("{}{}", opts.url, opts.health_path());
        let monitor = HealthMonitor::new(client.clone(), health_url, Arc::clone(&reachable));
        let ok = !opts.url.is_empty() && monitor.probe().await;

        if !ok {
            local.error("log dispatcher is not reachable, using local logger only", &[]);
            return Self::local_only(local, opts, reachable, handle);
        }

        local.info("log dispatcher is reachable, using remote logging", &[]);

        let dispatcher: Arc<dyn BatchSink> = Arc::new(HttpDispatcher::new(
            client,
            format!("{}{}", opts.url, opts.dispatch_endpoint),
            opts.api_key.clone(),
            Arc::clone(&reachable),
            Arc::clone(&local),
        ));
        let queue = Arc::new(BatchQueue::new(
            Some(dispatcher),
            opts.max_batch_size,
            handle.clone(),
        ));
        let scheduler = Scheduler::start(
            monitor,
            Arc::clone(&queue),
            opts.heartbeat_interval,
            opts.flush_interval,
            &handle,
        );

        Self {
            local,
            shared: Arc::new(Shared {
                opts,
                reachable,
                queue,
                scheduler: Some(scheduler),
            }),
        }
    }

    fn local_only(
        local: Arc<dyn LocalSink>,
        mut opts: Options,
        reachable: Arc<AtomicBool>,
        handle: Handle,
    ) -> Self {
        opts.url.clear();
        reachable.store(false, Ordering::Relaxed);
        let queue = Arc::new(BatchQueue::new(None, opts.max_batch_size, handle));
        Self {
            local,
            shared: Arc::new(Shared {
                opts,
                reachable,
                queue,
                scheduler: None,
            }),
        }
    }

    pub fn debug(&self, msg: &str, args: &[Arg]) {
        self.local.debug(msg, args);
        self.dispatch(Level::Debug, msg, args);
    }

    pub fn info(&self, msg: &str, args: &[Arg]) {
        self.local.info(msg, args);
        self.dispatch(Level::Info, msg, args);
    }

    pub fn warn(&self, msg: &str, args: &[Arg]) {
        self.local.warn(msg, args);
        self.dispatch(Level::Warn, msg, args);
    }

    pub fn error(&self, msg: &str, args: &[Arg]) {
        self.local.error(msg, args);
        self.dispatch(Level::Error, msg, args);
    }

    /// Log at a level chosen at runtime.
    pub fn log(&self, level: Level, msg: &str, args: &[Arg]) {
        self.local.log(level, msg, args);
        self.dispatch(level, msg, args);
    }

    /// Log pre-built `(key, value)` attributes at a level chosen at runtime.
    pub fn log_attrs(&self, level: Level, msg: &str, attrs: &[(&str, Arg)]) {
        let args: Vec<Arg> = attrs
            .iter()
            .flat_map(|(key, value)| [Arg::from(*key), value.clone()])
            .collect();
        self.log(level, msg, &args);
    }

    /// Log at error level, wait until the queue is delivered, then exit
    /// the process with status 1.
    pub async fn fatal(&self, msg: &str, args: &[Arg]) -> ! {
        self.local.error(msg, args);
        if self.dispatch(Level::Error, msg, args) {
            self.shared.queue.drain().await;
        }
        std::process::exit(1)
    }

    /// Derive a logger whose local writes carry `args`.
    pub fn with(&self, args: &[Arg]) -> Self {
        Self {
            local: self.local.with(args),
            shared: Arc::clone(&self.shared),
        }
    }

    /// Derive a logger whose local keys are nested under `name`.
    pub fn with_group(&self, name: &str) -> Self {
        Self {
            local: self.local.with_group(name),
            shared: Arc::clone(&self.shared),
        }
    }

    /// Stop the timers and flush whatever is still queued.
    ///
    /// Only the first call on any handle to this logger does work.
    pub async fn close(&self) {
        let Some(scheduler) = &self.shared.scheduler else {
            return;
        };
        if !scheduler.shutdown().await {
            self.local.warn("logger already closed", &[]);
        }
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.local.enabled(level)
    }

    pub fn local_sink(&self) -> &Arc<dyn LocalSink> {
        &self.local
    }

    pub fn options(&self) -> &Options {
        &self.shared.opts
    }

    /// Current value of the reachability flag; may be stale.
    pub fn is_reachable(&self) -> bool {
        self.shared.reachable.load(Ordering::Relaxed)
    }

    /// Whether remote dispatch survived the startup probe.
    pub fn remote_enabled(&self) -> bool {
        self.shared.queue.is_enabled()
    }

    /// Number of records waiting for the next flush.
    pub fn pending(&self) -> usize {
        self.shared.queue.pending()
    }

    fn dispatch(&self, level: Level, msg: &str, args: &[Arg]) -> bool {
        if !self.is_reachable() || level < self.shared.opts.min_dispatch_level {
            return false;
        }
        if self
            .shared
            .scheduler
            .as_ref()
            .map_or(true, Scheduler::is_closed)
        {
            return false;
        }

        let record = LogRecord::new(level, msg, flatten_args(args), self.shared.opts.source.as_str());
        self.shared.queue.enqueue(record);
        true
    }
}
