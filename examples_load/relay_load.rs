use std::sync::Arc;
use std::time::Instant;

use tracing_log_relay::env::{env_or, LOG_RELAY_URL_ENV};
use tracing_log_relay::noop_sink::NoopSink;
use tracing_log_relay::{args, Logger, Options};

#[tokio::main]
async fn main() {
    let opts = Options {
        source: "relay-load".to_string(),
        ..Options::new(env_or(LOG_RELAY_URL_ENV, "http://127.0.0.1:8080"))
    };
    let logger = Logger::new(Arc::new(NoopSink::default()), opts).await;

    let n: u64 = 100_000;
    let start = Instant::now();

    for i in 0..n {
        logger.error("relay load test error", &args!["iteration" => i]);
    }

    let elapsed = start.elapsed();
    println!(
        "remote enabled: {}, logged {} events in {:?} (~{:.0} ev/s)",
        logger.remote_enabled(),
        n,
        elapsed,
        n as f64 / elapsed.as_secs_f64()
    );

    // Drains whatever is still queued before exiting.
    logger.close().await;
}
