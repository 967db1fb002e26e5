use crate::record::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{Layer, Registry};

#[derive(thiserror::Error, Debug)]
#[error("a global tracing subscriber is already installed")]
pub struct InitError(#[from] tracing::subscriber::SetGlobalDefaultError);

fn level_filter(level: Level) -> LevelFilter {
    match level {
        Level::Debug => LevelFilter::DEBUG,
        Level::Info => LevelFilter::INFO,
        Level::Warn => LevelFilter::WARN,
        Level::Error => LevelFilter::ERROR,
    }
}

/// Install a [`Registry`] with a `fmt` layer as the global `tracing`
/// subscriber, so [`crate::tracing_sink::TracingSink`] output reaches
/// stdout.
///
/// **Parameters**
/// - `max_level`: least severe level that is printed.
///
/// **Returns**
/// - `Err(InitError)` if another global subscriber was installed first.
pub fn init_stdout(max_level: Level) -> Result<(), InitError> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(level_filter(max_level));
    let subscriber = Registry::default().with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
