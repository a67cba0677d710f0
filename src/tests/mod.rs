// src/tests/mod.rs

use super::color::ColorMode;
use super::entry::{CallSite, LogEntry};
use super::level::Level;
use super::log_core::Logger;
use super::sink::SinkFn;

// ========== Test helpers ==========

/// Logs through a local `Logger`, capturing file/line like the production macros
macro_rules! test_log {
    ($logger:expr, $level:expr, module: $module:expr, $($arg:tt)*) => {
        $logger.log(
            LogEntry::new($level, CallSite::new(file!(), line!())).with_module($module),
            format_args!($($arg)*),
        )
    };
    ($logger:expr, $level:expr, $($arg:tt)*) => {
        $logger.log(
            LogEntry::new($level, CallSite::new(file!(), line!())),
            format_args!($($arg)*),
        )
    };
}

/// A capture sink with its own buffer: `(sink, take)` where `take` drains
/// everything written so far as a `String`.
///
/// Every expansion gets separate statics, so tests running in parallel never
/// share a buffer.
macro_rules! capture {
    () => {{
        static BUF: std::sync::Mutex<Vec<u8>> = std::sync::Mutex::new(Vec::new());

        fn sink(bytes: &[u8]) {
            BUF.lock().unwrap().extend_from_slice(bytes);
        }

        fn take() -> String {
            String::from_utf8(std::mem::take(&mut *BUF.lock().unwrap())).unwrap()
        }

        (sink as $crate::sink::SinkFn, take as fn() -> String)
    }};
}

/// Environment with neither `CT_LOG_LEVEL` nor `CT_DEBUG`
fn no_env(_: &str) -> Option<String> {
    None
}

/// An enabled, colourless logger writing to `sink` with an empty environment
fn test_logger(sink: SinkFn) -> Logger {
    let logger = Logger::with_env(no_env);
    logger.set_sink(Some(sink));
    logger.set_color_mode(ColorMode::Never);
    logger.enable();
    logger
}

/// `|pid| ` as rendered without colour
fn pid_block() -> String {
    format!("|{}| ", std::process::id())
}

mod concurrency;
