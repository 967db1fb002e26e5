use crate::record::Level;
use crate::value::Arg;
use std::sync::Arc;

/// Local destination every logging call is written to, regardless of
/// whether the remote collector is reachable.
///
/// The relay only depends on this narrow contract: four leveled writes,
/// a level query, and two ways of deriving a sink that carries extra
/// context. [`crate::tracing_sink::TracingSink`] is the default.
pub trait LocalSink: Send + Sync {
    fn debug(&self, msg: &str, args: &[Arg]);
    fn info(&self, msg: &str, args: &[Arg]);
    fn warn(&self, msg: &str, args: &[Arg]);
    fn error(&self, msg: &str, args: &[Arg]);

    /// Whether a write at `level` would produce output.
    fn enabled(&self, level: Level) -> bool;

    /// Derive a sink that attaches `args` to every subsequent write.
    fn with(&self, args: &[Arg]) -> Arc<dyn LocalSink>;

    /// Derive a sink that nests subsequent keys under `name`.
    fn with_group(&self, name: &str) -> Arc<dyn LocalSink>;

    fn log(&self, level: Level, msg: &str, args: &[Arg]) {
        match level {
            Level::Debug => self.debug(msg, args),
            Level::Info => self.info(msg, args),
            Level::Warn => self.warn(msg, args),
            Level::Error => self.error(msg, args),
        }
    }
}
