pub mod record;
pub mod value;
pub mod sink;
pub mod tracing_sink;
pub mod noop_sink;

pub mod config;
pub mod env;
pub mod health;
pub mod dispatcher;
pub mod queue;
pub mod scheduler;
pub mod logger;

pub mod init;

pub use config::Options;
pub use logger::Logger;
pub use record::{parse_level, Level, LogRecord};
pub use sink::LocalSink;
pub use value::{stringify, Arg};
