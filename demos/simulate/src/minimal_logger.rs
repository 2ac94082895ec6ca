use colored::Colorize;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

/// Prints `LEVEL message` lines to stderr so stdout stays free for the tree.
pub struct MinimalLogger;

static LOGGER: MinimalLogger = MinimalLogger;

impl MinimalLogger {
    /// Install the logger.  `verbosity` is the number of `-v` flags.
    pub fn init(verbosity: u8) -> Result<(), SetLoggerError> {
        let level = match verbosity {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
    }
}

impl log::Log for MinimalLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level = match record.level() {
            Level::Error => record.level().to_string().red(),
            Level::Warn => record.level().to_string().yellow(),
            Level::Info => record.level().to_string().cyan(),
            Level::Debug => record.level().to_string().purple(),
            Level::Trace => record.level().to_string().normal(),
        };
        eprintln!("{:<5} {}", level, record.args());
    }

    fn flush(&self) {}
}
