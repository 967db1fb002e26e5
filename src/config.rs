use crate::env::{
    env_opt, LOG_RELAY_API_KEY_ENV, LOG_RELAY_DISPATCH_ENDPOINT_ENV,
    LOG_RELAY_FLUSH_INTERVAL_MS_ENV, LOG_RELAY_HEALTH_ENDPOINT_ENV,
    LOG_RELAY_HEARTBEAT_INTERVAL_SECS_ENV, LOG_RELAY_MAX_BATCH_SIZE_ENV,
    LOG_RELAY_MIN_LEVEL_ENV, LOG_RELAY_SOURCE_ENV, LOG_RELAY_URL_ENV,
};
use crate::record::{Level, ParseLevelError};
use std::time::Duration;

pub const DEFAULT_DISPATCH_ENDPOINT: &str = "/api/log";
pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_BATCH_SIZE: usize = 100;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings of a [`crate::logger::Logger`], fixed for its lifetime.
///
/// **Fields**
/// - `url`: base URL of the remote collector; empty disables remote
///   dispatch entirely.
/// - `api_key`: sent as `X-API-Key` when present.
/// - `source`: tag stamped on every record.
/// - `dispatch_endpoint`: path batches are POSTed to.
/// - `health_endpoint`: path probed with GET; falls back to
///   `dispatch_endpoint`.
/// - `heartbeat_interval`: pause between reachability probes.
/// - `flush_interval`: pause between timer-driven flushes.
/// - `max_batch_size`: queue length that triggers an immediate flush.
/// - `min_dispatch_level`: records below this level stay local.
/// - `request_timeout`: bound on every probe and dispatch request.
#[derive(Clone, Debug)]
pub struct Options {
    pub url: String,
    pub api_key: Option<String>,
    pub source: String,
    pub dispatch_endpoint: String,
    pub health_endpoint: Option<String>,
    pub heartbeat_interval: Duration,
    pub flush_interval: Duration,
    pub max_batch_size: usize,
    pub min_dispatch_level: Level,
    pub request_timeout: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: None,
            source: String::new(),
            dispatch_endpoint: DEFAULT_DISPATCH_ENDPOINT.to_string(),
            health_endpoint: None,
            heartbeat_interval: DEFAULT_HEARTBEAT_INTERVAL,
            flush_interval: DEFAULT_FLUSH_INTERVAL,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            min_dispatch_level: Level::Debug,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{key} is not a valid number: {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    #[error(transparent)]
    InvalidLevel(#[from] ParseLevelError),
}

impl Options {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Replace zero or empty settings with their defaults.
    pub fn normalized(mut self) -> Self {
        if self.heartbeat_interval.is_zero() {
            self.heartbeat_interval = DEFAULT_HEARTBEAT_INTERVAL;
        }
        if self.flush_interval.is_zero() {
            self.flush_interval = DEFAULT_FLUSH_INTERVAL;
        }
        if self.max_batch_size == 0 {
            self.max_batch_size = DEFAULT_MAX_BATCH_SIZE;
        }
        if self.request_timeout.is_zero() {
            self.request_timeout = DEFAULT_REQUEST_TIMEOUT;
        }
        if self.dispatch_endpoint.is_empty() {
            self.dispatch_endpoint = DEFAULT_DISPATCH_ENDPOINT.to_string();
        }
        if self.health_endpoint.as_deref().map_or(true, str::is_empty) {
            self.health_endpoint = Some(self.dispatch_endpoint.clone());
        }
        self
    }

    /// Path probed by the health monitor.
    pub fn health_path(&self) -> &str {
        self.health_endpoint
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(&self.dispatch_endpoint)
    }

    /// Build options from `LOG_RELAY_*` environment variables. Unset
    /// variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut opts = Self::default();

        if let Some(url) = env_opt(LOG_RELAY_URL_ENV) {
            opts.url = url;
        }
        opts.api_key = env_opt(LOG_RELAY_API_KEY_ENV);
        if let Some(source) = env_opt(LOG_RELAY_SOURCE_ENV) {
            opts.source = source;
        }
        if let Some(path) = env_opt(LOG_RELAY_DISPATCH_ENDPOINT_ENV) {
            opts.dispatch_endpoint = path;
        }
        opts.health_endpoint = env_opt(LOG_RELAY_HEALTH_ENDPOINT_ENV);
        if let Some(secs) = parse_env_u64(LOG_RELAY_HEARTBEAT_INTERVAL_SECS_ENV)? {
            opts.heartbeat_interval = Duration::from_secs(secs);
        }
        if let Some(ms) = parse_env_u64(LOG_RELAY_FLUSH_INTERVAL_MS_ENV)? {
            opts.flush_interval = Duration::from_millis(ms);
        }
        if let Some(size) = parse_env_u64(LOG_RELAY_MAX_BATCH_SIZE_ENV)? {
            opts.max_batch_size = size as usize;
        }
        if let Some(level) = env_opt(LOG_RELAY_MIN_LEVEL_ENV) {
            opts.min_dispatch_level = level.parse()?;
        }

        Ok(opts)
    }
}

fn parse_env_u64(key: &'static str) -> Result<Option<u64>, ConfigError> {
    env_opt(key)
        .map(|value| {
            value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber { key, value })
        })
        .transpose()
}
