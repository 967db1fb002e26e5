use crate::record::Level;
use crate::sink::LocalSink;
use crate::value::{flatten_args, Arg};
use std::sync::Arc;

/// [`LocalSink`] that forwards every write as a `tracing` event.
///
/// `tracing` needs field names at compile time, so call arguments and
/// attached context are rendered into a single `fields` value of
/// space-separated `key=value` pairs. Install a subscriber (for example
/// with [`crate::init::init_stdout`]) to see the output.
#[derive(Clone, Debug, Default)]
pub struct TracingSink {
    context: Vec<(String, String)>,
    group: Option<String>,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn qualify(&self, key: &str) -> String {
        match &self.group {
            Some(group) => format!("{}.{}", group, key),
            None => key.to_string(),
        }
    }

    fn render(&self, args: &[Arg]) -> String {
        let call = flatten_args(args)
            .into_iter()
            .map(|(k, v)| (self.qualify(&k), v));

        self.context
            .iter()
            .cloned()
            .chain(call)
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl LocalSink for TracingSink {
    fn debug(&self, msg: &str, args: &[Arg]) {
        tracing::debug!(fields = %self.render(args), "{}", msg);
    }

    fn info(&self, msg: &str, args: &[Arg]) {
        tracing::info!(fields = %self.render(args), "{}", msg);
    }

    fn warn(&self, msg: &str, args: &[Arg]) {
        tracing::warn!(fields = %self.render(args), "{}", msg);
    }

    fn error(&self, msg: &str, args: &[Arg]) {
        tracing::error!(fields = %self.render(args), "{}", msg);
    }

    fn enabled(&self, level: Level) -> bool {
        match level {
            Level::Debug => tracing::enabled!(tracing::Level::DEBUG),
            Level::Info => tracing::enabled!(tracing::Level::INFO),
            Level::Warn => tracing::enabled!(tracing::Level::WARN),
            Level::Error => tracing::enabled!(tracing::Level::ERROR),
        }
    }

    fn with(&self, args: &[Arg]) -> Arc<dyn LocalSink> {
        let mut derived = self.clone();
        derived.context.extend(
            flatten_args(args)
                .into_iter()
                .map(|(k, v)| (self.qualify(&k), v)),
        );
        Arc::new(derived)
    }

    fn with_group(&self, name: &str) -> Arc<dyn LocalSink> {
        let mut derived = self.clone();
        derived.group = Some(self.qualify(name));
        Arc::new(derived)
    }
}
