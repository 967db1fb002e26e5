use crate::health::HealthMonitor;
use crate::queue::BatchQueue;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};

/// Owns the heartbeat and flush timers and the shutdown sequence.
pub struct Scheduler {
    queue: Arc<BatchQueue>,
    shutdown: watch::Sender<bool>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
    closed: AtomicBool,
}

impl Scheduler {
    /// Spawn the heartbeat and flush loops on `handle`.
    ///
    /// Each loop ticks for the first time one full interval after start
    /// and exits as soon as the shutdown signal is broadcast.
    pub fn start(
        monitor: HealthMonitor,
        queue: Arc<BatchQueue>,
        heartbeat: Duration,
        flush_interval: Duration,
        handle: &Handle,
    ) -> Self {
        let (shutdown, _) = watch::channel(false);

        let mut heartbeat_stop = shutdown.subscribe();
        let heartbeat_task = handle.spawn(async move {
            let mut ticker = interval_at(Instant::now() + heartbeat, heartbeat);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        monitor.probe().await;
                    }
                    _ = heartbeat_stop.changed() => return,
                }
            }
        });

        let mut flush_stop = shutdown.subscribe();
        let flush_queue = Arc::clone(&queue);
        let flush_task = handle.spawn(async move {
            let mut ticker = interval_at(Instant::now() + flush_interval, flush_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        flush_queue.flush().await;
                    }
                    _ = flush_stop.changed() => return,
                }
            }
        });

        Self {
            queue,
            shutdown,
            tasks: Mutex::new(vec![heartbeat_task, flush_task]),
            closed: AtomicBool::new(false),
        }
    }

    /// Stop both timers and perform one final flush.
    ///
    /// A tick already running when the signal arrives completes first,
    /// as do size-triggered flushes spawned before it. Returns `false`
    /// without doing anything if shutdown already happened.
    pub async fn shutdown(&self) -> bool {
        if self.closed.swap(true, Ordering::AcqRel) {
            return false;
        }

        let _ = self.shutdown.send(true);

        let tasks = std::mem::take(&mut *self.tasks.lock().unwrap_or_else(|e| e.into_inner()));
        for task in tasks {
            let _ = task.await;
        }

        self.queue.drain().await;
        true
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}
