//! Severity levels and their labels

use core::fmt;
use core::str::FromStr;

use crate::color::Color;

/// Severity of a log line. Ordering defines the filter: a line passes when
/// `level >= min_level`.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Informational messages
    Info = 0,
    /// Conditions that deserve a look
    Warn = 1,
    /// Failures
    Error = 2,
}

impl Level {
    /// All levels, least severe first
    pub const ALL: [Level; 3] = [Level::Info, Level::Warn, Level::Error];

    /// Label written inside the level tag
    pub const fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }

    /// Display colour of the level tag
    pub const fn color(&self) -> Color {
        match self {
            Level::Info => Color::Green,
            Level::Warn => Color::Yellow,
            Level::Error => Color::Red,
        }
    }

    /// Decodes a level stored in an atomic. Out-of-range values clamp to `Error`.
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0 => Level::Info,
            1 => Level::Warn,
            _ => Level::Error,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names none of the supported levels
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized log level `{0}` (expected info, warn or error)")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    /// Case-insensitive: `info`, `warn`, `error`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}
