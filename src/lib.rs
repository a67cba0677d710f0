//! Opt-in, process-wide leveled logging.
//!
//! Callers emit leveled, optionally module-tagged messages; the logger
//! filters them, renders one line per call and writes it to a swappable sink
//! (stderr by default):
//!
//! ```text
//! [2025-01-15T10:45:23.456] |4242| ==ct== [WARN] main.rs:42 (db) pool exhausted
//! ```
//!
//! The timestamp, source location and module tag are optional. Output is off
//! until [`enable_logging`] is called.
//!
//! # Startup defaults
//!
//! The first log call (or the first explicit level/module change) reads
//! `CT_LOG_LEVEL` (`info`, `warn`, `error`) and `CT_DEBUG` (a comma-separated
//! module list). Explicit API calls always take precedence over both.
//!
//! # Example
//!
//! ```rust
//! use coretrace::{ct_info, ct_warn, Level};
//!
//! coretrace::enable_logging();
//! coretrace::set_min_level(Level::Warn);
//! ct_info!("filtered\n");
//! ct_warn!("shown\n");
//! ```

pub mod bridge;
pub mod color;
pub mod config;
pub mod encode;
pub mod entry;
pub mod filter;
pub mod level;
pub mod log_core;
pub mod macros;
pub mod process;
pub mod sink;
pub mod sync;

mod fixed_str;

#[cfg(test)]
mod tests;

use core::fmt;

pub use bridge::{install_log_bridge, LogBridge};
pub use color::{Color, ColorMode};
pub use entry::{CallSite, LogEntry};
pub use level::{Level, ParseLevelError};
pub use log_core::{EnvLookup, Logger};
pub use process::{pid, thread_id};
pub use sink::SinkFn;

/// The process-wide logger behind the free functions and macros
pub static LOGGER: Logger = Logger::new();

/// Turns output on (it is off by default)
pub fn enable_logging() {
    LOGGER.enable();
}

/// Turns output off
pub fn disable_logging() {
    LOGGER.disable();
}

/// Whether output is on
pub fn log_is_enabled() -> bool {
    LOGGER.is_enabled()
}

/// Sets the prefix tag (default `==ct==`), truncated to 63 bytes
pub fn set_prefix(prefix: &str) {
    LOGGER.set_prefix(prefix);
}

/// Sets the minimum level, overriding `CT_LOG_LEVEL`
pub fn set_min_level(level: Level) {
    LOGGER.set_min_level(level);
}

/// Current minimum level
pub fn min_level() -> Level {
    LOGGER.min_level()
}

/// Adds a module to the filter, overriding `CT_DEBUG`
pub fn enable_module(name: &str) {
    LOGGER.enable_module(name);
}

/// Removes a module from the filter
pub fn disable_module(name: &str) {
    LOGGER.disable_module(name);
}

/// Clears the module filter so every module passes
pub fn enable_all_modules() {
    LOGGER.enable_all_modules();
}

/// Whether a line tagged `name` passes the module filter
pub fn module_is_enabled(name: &str) -> bool {
    LOGGER.module_is_enabled(name)
}

/// Serialises whole lines when on (the default)
pub fn set_thread_safe(enabled: bool) {
    LOGGER.set_thread_safe(enabled);
}

/// Redirects output to `sink`; `None` restores stderr
pub fn set_sink(sink: Option<SinkFn>) {
    LOGGER.set_sink(sink);
}

/// Restores stderr as the destination
pub fn reset_sink() {
    LOGGER.reset_sink();
}

/// Prepends an ISO 8601 timestamp to each line
pub fn set_timestamps(enabled: bool) {
    LOGGER.set_timestamps(enabled);
}

/// Shows `file:line` of the call site in each line
pub fn set_source_location(enabled: bool) {
    LOGGER.set_source_location(enabled);
}

/// Chooses whether escape sequences are emitted
pub fn set_color_mode(mode: ColorMode) {
    LOGGER.set_color_mode(mode);
}

/// Escape sequence for `c`, or `""` when colour output is off
pub fn color(c: Color) -> &'static str {
    LOGGER.color(c)
}

/// `"INFO"`, `"WARN"` or `"ERROR"`
pub fn level_label(level: Level) -> &'static str {
    level.as_str()
}

/// Escape sequence for the level tag, or `""` when colour output is off
pub fn level_color(level: Level) -> &'static str {
    LOGGER.level_color(level)
}

/// Writes bytes to the current sink
pub fn write_raw(bytes: &[u8]) {
    LOGGER.write_raw(bytes);
}

/// Writes a string to the current sink
pub fn write_str(s: &str) {
    LOGGER.write_str(s);
}

/// Writes `|pid| prefix [LEVEL] ` without taking the output lock
pub fn write_prefix(level: Level) {
    LOGGER.write_prefix(level);
}

/// Writes `value` in decimal
pub fn write_dec(value: u64) {
    LOGGER.write_dec(value);
}

/// Writes `value` as `0x`-prefixed hex
pub fn write_hex(value: u64) {
    LOGGER.write_hex(value);
}

/// Applies `CT_LOG_LEVEL`/`CT_DEBUG` now instead of on first use
pub fn init_once() {
    LOGGER.init_once();
}

/// Logs a message at `level`, recording the caller's file and line.
///
/// ```rust
/// use coretrace::Level;
///
/// coretrace::log(Level::Warn, format_args!("count={}\n", 42));
/// ```
#[track_caller]
pub fn log(level: Level, args: fmt::Arguments<'_>) {
    LOGGER.log(LogEntry::here(level), args);
}

/// Logs a module-tagged message; it is dropped if the module filter rejects `module`
#[track_caller]
pub fn log_module(level: Level, module: &str, args: fmt::Arguments<'_>) {
    LOGGER.log(LogEntry::here(level).with_module(module), args);
}
