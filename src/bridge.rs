//! Adapter for the `log` facade
//!
//! Routes records emitted through `log::info!` and friends into a
//! [`Logger`]. The record target becomes the module tag, so the module
//! filter applies to bridged records too.

use crate::entry::{CallSite, LogEntry};
use crate::level::Level;
use crate::log_core::Logger;
use crate::LOGGER;

/// `log::Log` implementation backed by a [`Logger`]
pub struct LogBridge {
    logger: &'static Logger,
}

impl LogBridge {
    /// A bridge into `logger`
    pub const fn new(logger: &'static Logger) -> Self {
        Self { logger }
    }
}

/// `Debug` and `Trace` have no counterpart here and are reported as `Info`.
fn map_level(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::Error,
        log::Level::Warn => Level::Warn,
        log::Level::Info | log::Level::Debug | log::Level::Trace => Level::Info,
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        self.logger
            .would_log(map_level(metadata.level()), Some(metadata.target()))
    }

    fn log(&self, record: &log::Record<'_>) {
        let line = record.line().unwrap_or(0);
        let site = match record.file() {
            Some(file) => CallSite::new(file, line),
            None => CallSite::unknown(line),
        };
        let entry = LogEntry::new(map_level(record.level()), site).with_module(record.target());
        self.logger.log(entry, format_args!("{}\n", record.args()));
    }

    fn flush(&self) {}
}

static BRIDGE: LogBridge = LogBridge::new(&LOGGER);

/// Installs the process-wide logger as the `log` facade backend.
///
/// Fails if another `log` backend is already installed.
pub fn install_log_bridge() -> Result<(), log::SetLoggerError> {
    log::set_logger(&BRIDGE)?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}
