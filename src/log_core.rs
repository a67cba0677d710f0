//! Log system core implementation
//!
//! This module encapsulates all logging state and logic into a single
//! `Logger` struct. The process-wide instance is a `static` built by a
//! `const fn`; independent instances can be created for testing.
//!
//! # Synchronisation
//!
//! - Scalar settings (enabled flag, minimum level, toggles, explicit-override
//!   flags, sink pointer) are independent atomics with acquire/release
//!   ordering. Readers never block on them.
//! - The prefix and the module table live behind the *configuration lock*.
//! - One complete line write happens behind the *output lock* while thread
//!   safety is on. It is a blocking `std::sync::Mutex`: a slow sink parks
//!   the other writers instead of keeping them spinning.
//!
//! The two locks are separate, so reconfiguring never waits on a slow sink
//! for longer than a prefix copy.

use core::fmt::{self, Write};
use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::borrow::Cow;
use std::panic::{self, AssertUnwindSafe};
use std::sync::PoisonError;

use chrono::Utc;
use once_cell::sync::OnceCell;

use crate::color::{Color, ColorMode};
use crate::config::{
    DEFAULT_LOG_LEVEL, DEFAULT_PREFIX, ENV_LOG_LEVEL, ENV_MODULES, FORMAT_ERROR_LINE,
    PREFIX_CAPACITY,
};
use crate::encode::{self, DecBuf, HexBuf, TimestampBuf};
use crate::entry::LogEntry;
use crate::filter::ModuleFilter;
use crate::fixed_str::FixedStr;
use crate::level::Level;
use crate::process;
use crate::sink::{Sink, SinkFn, SinkRegistry};
use crate::sync::Mutex;

/// Reads one environment variable
pub type EnvLookup = fn(&str) -> Option<String>;

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

type Prefix = FixedStr<PREFIX_CAPACITY>;

/// Multi-byte settings guarded by the configuration lock
struct Settings {
    prefix: Prefix,
    modules: ModuleFilter,
}

/// Core logging system
///
/// Holds the filter and format configuration, the sink, and the lazy
/// environment initializer.
///
/// # Thread Safety
///
/// Every method takes `&self` and may be called concurrently with any other.
pub struct Logger {
    enabled: AtomicBool,
    min_level: AtomicU8,
    timestamps: AtomicBool,
    source_location: AtomicBool,
    thread_safe: AtomicBool,
    color_mode: AtomicU8,

    /// Set once an API call owns the minimum level; never cleared
    level_explicit: AtomicBool,
    /// Set once an API call owns the module table; never cleared
    modules_explicit: AtomicBool,
    /// Mirrors `settings.modules.is_active()`, written under the configuration lock
    filter_active: AtomicBool,

    settings: Mutex<Settings>,
    output: std::sync::Mutex<()>,
    sink: SinkRegistry,

    init: OnceCell<()>,
    env: EnvLookup,
}

impl Logger {
    /// Creates a logger that reads its startup defaults from the process environment.
    ///
    /// Logging starts disabled, at [`DEFAULT_LOG_LEVEL`], thread-safe, with
    /// timestamps and source locations off and output going to stderr.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use coretrace::Logger;
    ///
    /// static APP_LOG: Logger = Logger::new();
    /// ```
    pub const fn new() -> Self {
        Self::with_env(process_env)
    }

    /// Creates a logger whose startup defaults come from `env`
    pub const fn with_env(env: EnvLookup) -> Self {
        Self {
            enabled: AtomicBool::new(false),
            min_level: AtomicU8::new(DEFAULT_LOG_LEVEL as u8),
            timestamps: AtomicBool::new(false),
            source_location: AtomicBool::new(false),
            thread_safe: AtomicBool::new(true),
            color_mode: AtomicU8::new(ColorMode::Auto as u8),
            level_explicit: AtomicBool::new(false),
            modules_explicit: AtomicBool::new(false),
            filter_active: AtomicBool::new(false),
            settings: Mutex::new(Settings {
                prefix: Prefix::truncating(DEFAULT_PREFIX),
                modules: ModuleFilter::new(),
            }),
            output: std::sync::Mutex::new(()),
            sink: SinkRegistry::new(),
            init: OnceCell::new(),
            env,
        }
    }

    // ========== Lazy initialisation ==========

    /// Applies the environment defaults, once per logger.
    ///
    /// Safe to call from any thread any number of times. Racing first
    /// callers all wait for the single application to finish.
    pub fn init_once(&self) {
        self.init.get_or_init(|| self.apply_env_defaults());
    }

    fn apply_env_defaults(&self) {
        if !self.level_explicit.load(Ordering::Acquire) {
            if let Some(name) = (self.env)(ENV_LOG_LEVEL) {
                let level = name.trim().parse().unwrap_or(Level::Info);
                self.min_level.store(level as u8, Ordering::Release);
            }
        }

        if !self.modules_explicit.load(Ordering::Acquire) {
            if let Some(list) = (self.env)(ENV_MODULES) {
                self.with_modules(|modules| {
                    for name in list.split(',').map(str::trim) {
                        modules.enable(name);
                    }
                });
            }
        }
    }

    // ========== Enable / Disable ==========

    /// Turns output on
    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Release);
    }

    /// Turns output off; every later call is skipped before any other check
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Release);
    }

    /// Whether output is on
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    // ========== Prefix ==========

    /// Sets the prefix tag. Input beyond 63 bytes is dropped silently.
    pub fn set_prefix(&self, prefix: &str) {
        let prefix = Prefix::truncating(prefix);
        self.settings.lock().prefix = prefix;
    }

    /// Current prefix tag
    pub fn prefix(&self) -> String {
        self.prefix_snapshot().as_str().to_string()
    }

    fn prefix_snapshot(&self) -> Prefix {
        self.settings.lock().prefix
    }

    // ========== Level filtering ==========

    /// Sets the minimum level. Takes precedence over `CT_LOG_LEVEL` for the
    /// rest of the logger's life, whenever it is called.
    pub fn set_min_level(&self, level: Level) {
        self.level_explicit.store(true, Ordering::Release);
        self.init_once();
        self.min_level.store(level as u8, Ordering::Release);
    }

    /// Current minimum level
    pub fn min_level(&self) -> Level {
        Level::from_u8(self.min_level.load(Ordering::Acquire))
    }

    // ========== Module filtering ==========

    /// Adds `name` to the module filter. Takes precedence over `CT_DEBUG`.
    ///
    /// Empty names and names over 31 bytes are ignored, as are additions to a
    /// full table.
    pub fn enable_module(&self, name: &str) {
        if name.is_empty() || name.len() > ModuleFilter::MAX_NAME_LEN {
            return;
        }
        self.claim_modules();
        self.with_modules(|modules| modules.enable(name));
    }

    /// Removes `name` from the module filter
    pub fn disable_module(&self, name: &str) {
        if name.is_empty() {
            return;
        }
        self.claim_modules();
        self.with_modules(|modules| modules.disable(name));
    }

    /// Empties the module filter so every module passes again.
    ///
    /// The table stays owned by the API: `CT_DEBUG` is not re-applied.
    pub fn enable_all_modules(&self) {
        self.claim_modules();
        self.with_modules(ModuleFilter::clear);
    }

    /// Whether a line tagged `name` would pass the module filter
    pub fn module_is_enabled(&self, name: &str) -> bool {
        if !self.filter_active.load(Ordering::Acquire) {
            return true;
        }
        self.settings.lock().modules.allows(name)
    }

    /// Names currently in the module filter
    pub fn enabled_modules(&self) -> Vec<String> {
        self.settings
            .lock()
            .modules
            .names()
            .map(str::to_string)
            .collect()
    }

    fn claim_modules(&self) {
        self.modules_explicit.store(true, Ordering::Release);
        self.init_once();
    }

    fn with_modules<R>(&self, f: impl FnOnce(&mut ModuleFilter) -> R) -> R {
        let mut settings = self.settings.lock();
        let result = f(&mut settings.modules);
        self.filter_active
            .store(settings.modules.is_active(), Ordering::Release);
        result
    }

    // ========== Toggles ==========

    /// Serialises whole lines when on (the default).
    ///
    /// Turning it off skips the output lock: lines from concurrent threads
    /// may then interleave byte fragments.
    pub fn set_thread_safe(&self, enabled: bool) {
        self.thread_safe.store(enabled, Ordering::Release);
    }

    /// Whether line output is serialised
    pub fn is_thread_safe(&self) -> bool {
        self.thread_safe.load(Ordering::Acquire)
    }

    /// Prepends `[YYYY-MM-DDThh:mm:ss.mmm] ` (UTC) to each line
    pub fn set_timestamps(&self, enabled: bool) {
        self.timestamps.store(enabled, Ordering::Release);
    }

    /// Shows `file:line` of the call site in each line
    pub fn set_source_location(&self, enabled: bool) {
        self.source_location.store(enabled, Ordering::Release);
    }

    /// Chooses whether escape sequences are emitted
    pub fn set_color_mode(&self, mode: ColorMode) {
        self.color_mode.store(mode as u8, Ordering::Release);
    }

    /// Current colour mode
    pub fn color_mode(&self) -> ColorMode {
        ColorMode::from_u8(self.color_mode.load(Ordering::Acquire))
    }

    // ========== Sink ==========

    /// Redirects output to `sink`; `None` restores stderr
    pub fn set_sink(&self, sink: Option<SinkFn>) {
        self.sink.set(sink);
    }

    /// Restores stderr as the destination
    pub fn reset_sink(&self) {
        self.sink.reset();
    }

    /// The installed custom sink, if any
    pub fn sink(&self) -> Option<SinkFn> {
        self.sink.custom()
    }

    // ========== Colour helpers ==========

    /// Escape sequence for `color`, or `""` when colour output is off
    pub fn color(&self, color: Color) -> &'static str {
        if self.color_mode().enabled() {
            color.escape()
        } else {
            ""
        }
    }

    /// Escape sequence for the level tag, or `""` when colour output is off
    pub fn level_color(&self, level: Level) -> &'static str {
        self.color(level.color())
    }

    // ========== Low-level write ==========

    /// Writes bytes to the current sink
    pub fn write_raw(&self, bytes: &[u8]) {
        self.sink.load().write(bytes);
    }

    /// Writes a string to the current sink
    pub fn write_str(&self, s: &str) {
        self.write_raw(s.as_bytes());
    }

    /// Writes `value` in decimal
    pub fn write_dec(&self, value: u64) {
        let mut buf = DecBuf::default();
        self.write_raw(encode::encode_dec(value, &mut buf));
    }

    /// Writes `value` as `0x`-prefixed hex
    pub fn write_hex(&self, value: u64) {
        let mut buf = HexBuf::default();
        self.write_raw(encode::encode_hex(value, &mut buf));
    }

    /// Writes `|pid| prefix [LEVEL] ` without taking the output lock
    pub fn write_prefix(&self, level: Level) {
        let prefix = self.prefix_snapshot();
        let mut line = self.line_writer();
        line.pid();
        line.prefix(&prefix);
        line.level(level);
        line.raw(b" ");
    }

    // ========== Emission ==========

    /// Whether a line at `level`, tagged `module`, would currently be written
    pub fn would_log(&self, level: Level, module: Option<&str>) -> bool {
        self.init_once();

        if !self.is_enabled() {
            return false;
        }
        if level < self.min_level() {
            return false;
        }
        match module {
            Some(name) if !name.is_empty() => self.module_is_enabled(name),
            _ => true,
        }
    }

    /// Core logging implementation
    ///
    /// 1. Gate checks: enabled, level, module (atomics only unless a module
    ///    filter is active)
    /// 2. Render the message; a formatting failure writes a fixed diagnostic
    ///    line instead. A panicking `Display` counts as a failure, after the
    ///    process panic hook has seen the panic
    /// 3. Skip empty messages
    /// 4. Write the line atomically
    pub fn log(&self, entry: LogEntry<'_>, args: fmt::Arguments<'_>) {
        if !self.would_log(entry.level(), entry.module()) {
            return;
        }

        let message = match args.as_str() {
            Some(text) => Cow::Borrowed(text),
            None => match render(args) {
                Some(text) => Cow::Owned(text),
                None => {
                    self.write_str(FORMAT_ERROR_LINE);
                    return;
                }
            },
        };
        if message.is_empty() {
            return;
        }

        self.write_line(&entry, &message);
    }

    /// Writes one complete line.
    ///
    /// With thread safety on, the output lock is held from the timestamp to
    /// the last message byte, and every fragment goes to the sink that was
    /// current when the lock was taken.
    fn write_line(&self, entry: &LogEntry<'_>, message: &str) {
        let prefix = self.prefix_snapshot();
        // A sink that panicked mid-line poisons the lock; the next line still goes out.
        let _output = self
            .is_thread_safe()
            .then(|| self.output.lock().unwrap_or_else(PoisonError::into_inner));
        let mut line = self.line_writer();

        if self.timestamps.load(Ordering::Acquire) {
            let mut buf = TimestampBuf::default();
            line.raw(encode::encode_timestamp(&Utc::now(), &mut buf));
        }

        line.pid();
        line.prefix(&prefix);
        line.level(entry.level());

        if self.source_location.load(Ordering::Acquire) {
            let site = entry.site();
            line.raw(b" ");
            line.paint(Color::Dim);
            line.raw(site.basename().as_bytes());
            line.raw(b":");
            line.dec(u64::from(site.line()));
            line.paint(Color::Reset);
        }

        if let Some(module) = entry.module() {
            line.raw(b" ");
            line.paint(Color::Dim);
            line.raw(b"(");
            line.raw(module.as_bytes());
            line.raw(b")");
            line.paint(Color::Reset);
        }

        line.raw(b" ");
        line.raw(message.as_bytes());
    }

    fn line_writer(&self) -> LineWriter {
        LineWriter {
            sink: self.sink.load(),
            color: self.color_mode().enabled(),
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats `args`, turning both `fmt::Error` and a panicking `Display`
/// impl into `None`.
///
/// The unwind is caught but the process panic hook still runs first; the
/// default hook reports the panic on stderr whatever sink is installed.
fn render(args: fmt::Arguments<'_>) -> Option<String> {
    panic::catch_unwind(AssertUnwindSafe(|| {
        let mut text = String::new();
        text.write_fmt(args).ok().map(|()| text)
    }))
    .ok()
    .flatten()
}

/// Writes line fragments to one sink snapshot
struct LineWriter {
    sink: Sink,
    color: bool,
}

impl LineWriter {
    fn raw(&mut self, bytes: &[u8]) {
        self.sink.write(bytes);
    }

    fn paint(&mut self, color: Color) {
        if self.color {
            self.raw(color.escape().as_bytes());
        }
    }

    fn dec(&mut self, value: u64) {
        let mut buf = DecBuf::default();
        self.raw(encode::encode_dec(value, &mut buf));
    }

    /// `|pid| `
    fn pid(&mut self) {
        self.paint(Color::Dim);
        self.raw(b"|");
        self.dec(u64::from(process::pid()));
        self.raw(b"|");
        self.paint(Color::Reset);
        self.raw(b" ");
    }

    /// `prefix `
    fn prefix(&mut self, prefix: &Prefix) {
        self.paint(Color::Gray);
        self.paint(Color::Italic);
        self.raw(prefix.as_bytes());
        self.raw(b" ");
        self.paint(Color::Reset);
    }

    /// `[LEVEL]`
    fn level(&mut self, level: Level) {
        self.paint(level.color());
        self.raw(b"[");
        self.raw(level.as_str().as_bytes());
        self.raw(b"]");
        self.paint(Color::Reset);
    }
}
