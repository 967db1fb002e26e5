//! Environment variable names read by [`crate::config::Options::from_env`].
//!
//! These are purely helpers; the relay itself never touches the
//! environment unless asked to.

/// Base URL of the remote collector, e.g. `http://127.0.0.1:8080`.
pub const LOG_RELAY_URL_ENV: &str = "LOG_RELAY_URL";

/// Optional value of the `X-API-Key` header.
pub const LOG_RELAY_API_KEY_ENV: &str = "LOG_RELAY_API_KEY";

/// Source tag stamped on every record.
pub const LOG_RELAY_SOURCE_ENV: &str = "LOG_RELAY_SOURCE";

/// Path batches are POSTed to.
pub const LOG_RELAY_DISPATCH_ENDPOINT_ENV: &str = "LOG_RELAY_DISPATCH_ENDPOINT";

/// Path probed for reachability.
pub const LOG_RELAY_HEALTH_ENDPOINT_ENV: &str = "LOG_RELAY_HEALTH_ENDPOINT";

/// Heartbeat interval in whole seconds.
pub const LOG_RELAY_HEARTBEAT_INTERVAL_SECS_ENV: &str = "LOG_RELAY_HEARTBEAT_INTERVAL_SECS";

/// Flush interval in milliseconds.
pub const LOG_RELAY_FLUSH_INTERVAL_MS_ENV: &str = "LOG_RELAY_FLUSH_INTERVAL_MS";

/// Queue length that triggers an immediate flush.
pub const LOG_RELAY_MAX_BATCH_SIZE_ENV: &str = "LOG_RELAY_MAX_BATCH_SIZE";

/// Minimum level shipped remotely (`debug`, `info`, `warn`, `error`).
pub const LOG_RELAY_MIN_LEVEL_ENV: &str = "LOG_RELAY_MIN_LEVEL";

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read an environment variable, treating unset and empty alike.
pub fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
