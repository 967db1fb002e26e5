use std::sync::Arc;

use tracing_log_relay::init::init_stdout;
use tracing_log_relay::tracing_sink::TracingSink;
use tracing_log_relay::{args, Arg, Level, Logger, Options};

#[tokio::main]
async fn main() {
    if let Err(e) = init_stdout(Level::Debug) {
        eprintln!("{}", e);
    }

    let opts = Options {
        api_key: Some("local-dev-key".to_string()),
        source: "auth-service".to_string(),
        health_endpoint: Some("/health".to_string()),
        min_dispatch_level: Level::Warn,
        ..Options::new("http://127.0.0.1:8080")
    };
    let logger = Logger::new(Arc::new(TracingSink::new()), opts).await;

    logger.info("starting service", &[]);

    let requests = logger.with_group("http");
    let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "invalid password");
    requests.error(
        "authentication failed",
        &[Arg::from("user_id"), Arg::from(42), Arg::from("reason"), Arg::error(&err)],
    );
    requests.warn("slow response", &args!["elapsed_ms" => 1532.5]);

    logger.close().await;
}
