//! ANSI colour support
//!
//! Terminal capability is detected once per process: colour is off when
//! `NO_COLOR` is set, otherwise on when stderr is an interactive terminal.
//! The answer is cached and never re-evaluated, not even after a sink swap.

use core::sync::atomic::{AtomicU8, Ordering};
use std::io::IsTerminal;

use crate::config::ENV_NO_COLOR;

/// ANSI display attributes and colours
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Reset,

    Dim,
    Bold,
    Underline,
    Italic,
    Blink,
    Reverse,
    Hidden,
    Strike,

    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,

    Gray,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,

    BgBlack,
    BgRed,
    BgGreen,
    BgYellow,
    BgBlue,
    BgMagenta,
    BgCyan,
    BgWhite,

    BgGray,
    BgBrightRed,
    BgBrightGreen,
    BgBrightYellow,
    BgBrightBlue,
    BgBrightMagenta,
    BgBrightCyan,
    BgBrightWhite,
}

impl Color {
    /// Escape sequence for this colour, regardless of terminal capability
    pub const fn escape(&self) -> &'static str {
        match self {
            Color::Reset => "\x1b[0m",

            Color::Dim => "\x1b[2m",
            Color::Bold => "\x1b[1m",
            Color::Underline => "\x1b[4m",
            Color::Italic => "\x1b[3m",
            Color::Blink => "\x1b[5m",
            Color::Reverse => "\x1b[7m",
            Color::Hidden => "\x1b[8m",
            Color::Strike => "\x1b[9m",

            Color::Black => "\x1b[30m",
            Color::Red => "\x1b[31m",
            Color::Green => "\x1b[32m",
            Color::Yellow => "\x1b[33m",
            Color::Blue => "\x1b[34m",
            Color::Magenta => "\x1b[35m",
            Color::Cyan => "\x1b[36m",
            Color::White => "\x1b[37m",

            Color::Gray => "\x1b[90m",
            Color::BrightRed => "\x1b[91m",
            Color::BrightGreen => "\x1b[92m",
            Color::BrightYellow => "\x1b[93m",
            Color::BrightBlue => "\x1b[94m",
            Color::BrightMagenta => "\x1b[95m",
            Color::BrightCyan => "\x1b[96m",
            Color::BrightWhite => "\x1b[97m",

            Color::BgBlack => "\x1b[40m",
            Color::BgRed => "\x1b[41m",
            Color::BgGreen => "\x1b[42m",
            Color::BgYellow => "\x1b[43m",
            Color::BgBlue => "\x1b[44m",
            Color::BgMagenta => "\x1b[45m",
            Color::BgCyan => "\x1b[46m",
            Color::BgWhite => "\x1b[47m",

            Color::BgGray => "\x1b[100m",
            Color::BgBrightRed => "\x1b[101m",
            Color::BgBrightGreen => "\x1b[102m",
            Color::BgBrightYellow => "\x1b[103m",
            Color::BgBrightBlue => "\x1b[104m",
            Color::BgBrightMagenta => "\x1b[105m",
            Color::BgBrightCyan => "\x1b[106m",
            Color::BgBrightWhite => "\x1b[107m",
        }
    }
}

/// Whether a logger decorates its output with escape sequences
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Follow the cached terminal detection
    #[default]
    Auto = 0,
    /// Always emit escape sequences
    Always = 1,
    /// Never emit escape sequences
    Never = 2,
}

impl ColorMode {
    pub(crate) const fn from_u8(value: u8) -> Self {
        match value {
            1 => ColorMode::Always,
            2 => ColorMode::Never,
            _ => ColorMode::Auto,
        }
    }

    /// Resolves the mode against the process-wide terminal detection
    pub fn enabled(self) -> bool {
        match self {
            ColorMode::Auto => terminal_supports_color(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

const UNKNOWN: u8 = 0;
const SUPPORTED: u8 = 1;
const UNSUPPORTED: u8 = 2;

static TERMINAL_COLOR: AtomicU8 = AtomicU8::new(UNKNOWN);

/// Cached answer to "may the default destination show colour?"
///
/// Two threads racing on the first call both probe; they store the same answer.
pub fn terminal_supports_color() -> bool {
    match TERMINAL_COLOR.load(Ordering::Acquire) {
        SUPPORTED => true,
        UNSUPPORTED => false,
        _ => {
            let supported =
                std::env::var_os(ENV_NO_COLOR).is_none() && std::io::stderr().is_terminal();
            let cached = if supported { SUPPORTED } else { UNSUPPORTED };
            TERMINAL_COLOR.store(cached, Ordering::Release);
            supported
        }
    }
}
