//! Logging macros
//!
//! Each macro captures `file!()`/`line!()` at the expansion site and routes
//! through the process-wide [`LOGGER`](crate::LOGGER).
//!
//! # Usage
//!
//! ```rust
//! use coretrace::{ct_error, ct_info, ct_warn};
//!
//! coretrace::enable_logging();
//! ct_info!("Logger initialized\n");
//! ct_warn!("value={}\n", 42);
//! ct_info!(module: "alloc", "malloc ptr={:#x} size={}\n", 0xDEAD_BEEFu32, 64);
//! ct_error!("Something went wrong!\n");
//! ```
//!
//! Messages are written verbatim; include the trailing `\n` yourself.
//!
//! # Performance
//!
//! The gate checks run before `format_args!` is rendered, so calls that are
//! disabled or filtered never format their arguments.

/// Logs at an explicit level, optionally tagged with a module
///
/// ```rust
/// use coretrace::{ct_log, Level};
///
/// ct_log!(Level::Warn, "pool exhausted, count={}\n", 0);
/// ct_log!(Level::Info, module: "db", "connected\n");
/// ```
#[macro_export]
macro_rules! ct_log {
    ($level:expr, module: $module:expr, $($arg:tt)+) => {
        $crate::LOGGER.log(
            $crate::LogEntry::new($level, $crate::CallSite::new(file!(), line!()))
                .with_module($module),
            format_args!($($arg)+),
        )
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::LOGGER.log(
            $crate::LogEntry::new($level, $crate::CallSite::new(file!(), line!())),
            format_args!($($arg)+),
        )
    };
}

/// Logs at the INFO level
#[macro_export]
macro_rules! ct_info {
    ($($arg:tt)+) => {
        $crate::ct_log!($crate::Level::Info, $($arg)+)
    };
}

/// Logs at the WARN level
#[macro_export]
macro_rules! ct_warn {
    ($($arg:tt)+) => {
        $crate::ct_log!($crate::Level::Warn, $($arg)+)
    };
}

/// Logs at the ERROR level
#[macro_export]
macro_rules! ct_error {
    ($($arg:tt)+) => {
        $crate::ct_log!($crate::Level::Error, $($arg)+)
    };
}
