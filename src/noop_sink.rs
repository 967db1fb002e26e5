use crate::record::Level;
use crate::sink::LocalSink;
use crate::value::Arg;
use std::sync::Arc;

/// A local sink that simply drops all writes.
///
/// Useful for measuring the overhead of the relay itself without any
/// console output, and for tests that only care about the remote side.
#[derive(Clone, Default)]
pub struct NoopSink;

impl LocalSink for NoopSink {
    fn debug(&self, _msg: &str, _args: &[Arg]) {}
    fn info(&self, _msg: &str, _args: &[Arg]) {}
    fn warn(&self, _msg: &str, _args: &[Arg]) {}
    fn error(&self, _msg: &str, _args: &[Arg]) {}

    fn enabled(&self, _level: Level) -> bool {
        false
    }

    fn with(&self, _args: &[Arg]) -> Arc<dyn LocalSink> {
        Arc::new(NoopSink)
    }

    fn with_group(&self, _name: &str) -> Arc<dyn LocalSink> {
        Arc::new(NoopSink)
    }
}
