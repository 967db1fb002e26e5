use crate::dispatcher::BatchSink;
use crate::record::LogRecord;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::task::JoinSet;

/// Shared buffer of records waiting for the next flush.
///
/// Producers append under a short exclusive lock. A flush swaps the
/// buffer out under the same lock and performs network I/O after
/// releasing it, so a slow collector never blocks a logging call.
pub struct BatchQueue {
    records: Mutex<Vec<LogRecord>>,
    max_batch_size: usize,
    sink: Option<Arc<dyn BatchSink>>,
    handle: Handle,
    in_flight: Mutex<JoinSet<()>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl BatchQueue {
    /// **Parameters**
    /// - `sink`: destination of drained batches; `None` disables flushing.
    /// - `max_batch_size`: queue length that triggers an immediate flush
    ///   (values below 1 are treated as 1).
    /// - `handle`: runtime size-triggered flushes are spawned on.
    pub fn new(sink: Option<Arc<dyn BatchSink>>, max_batch_size: usize, handle: Handle) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            max_batch_size: max_batch_size.max(1),
            sink,
            handle,
            in_flight: Mutex::new(JoinSet::new()),
        }
    }

    /// Append a record. Reaching `max_batch_size` spawns a flush without
    /// waiting for it.
    pub fn enqueue(self: &Arc<Self>, record: LogRecord) {
        let full = {
            let mut records = lock(&self.records);
            records.push(record);
            records.len() >= self.max_batch_size
        };

        if full && self.sink.is_some() {
            let queue = Arc::clone(self);
            let mut in_flight = lock(&self.in_flight);
            while in_flight.try_join_next().is_some() {}
            in_flight.spawn_on(async move { queue.flush().await }, &self.handle);
        }
    }

    /// Drain the queue into one batch and hand it to the sink.
    ///
    /// No-op when the queue is empty or remote dispatch is disabled. A
    /// batch whose send fails is dropped, not requeued.
    pub async fn flush(&self) {
        let Some(sink) = &self.sink else {
            return;
        };

        let batch = {
            let mut records = lock(&self.records);
            if records.is_empty() {
                return;
            }
            std::mem::take(&mut *records)
        };

        sink.send_batch(batch).await;
    }

    /// Wait for every size-triggered flush spawned so far.
    pub async fn wait_in_flight(&self) {
        let mut set = std::mem::take(&mut *lock(&self.in_flight));
        while set.join_next().await.is_some() {}
    }

    /// Wait for in-flight flushes, then flush whatever is left. Returns
    /// once every record enqueued before the call has been handed to the
    /// sink.
    pub async fn drain(&self) {
        self.wait_in_flight().await;
        self.flush().await;
    }

    pub fn pending(&self) -> usize {
        lock(&self.records).len()
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }
}
