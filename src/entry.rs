//! Call-site metadata attached to each log line

use core::panic::Location;

use crate::config::UNKNOWN_FILE;
use crate::level::Level;

/// Source position captured at the logging call expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite<'a> {
    file: Option<&'a str>,
    line: u32,
}

impl<'a> CallSite<'a> {
    /// A call site from a known file and line
    pub const fn new(file: &'a str, line: u32) -> Self {
        Self {
            file: Some(file),
            line,
        }
    }

    /// A call site whose file is not known
    pub const fn unknown(line: u32) -> Self {
        Self { file: None, line }
    }

    /// Location of the caller of the enclosing `#[track_caller]` function
    #[track_caller]
    pub fn caller() -> CallSite<'static> {
        let location = Location::caller();
        CallSite::new(location.file(), location.line())
    }

    /// Full path as captured, if any
    pub fn file(&self) -> Option<&'a str> {
        self.file
    }

    /// Line number as captured
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Last path segment of the file, or a placeholder when unknown
    pub fn basename(&self) -> &'a str {
        match self.file {
            Some(path) if !path.is_empty() => path.rsplit(['/', '\\']).next().unwrap_or(path),
            _ => UNKNOWN_FILE,
        }
    }
}

/// One logging call: its level, where it was made, and an optional module tag.
///
/// Entries live for the duration of the call only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogEntry<'a> {
    level: Level,
    site: CallSite<'a>,
    module: Option<&'a str>,
}

impl<'a> LogEntry<'a> {
    /// An entry at `level` recorded at `site`
    pub const fn new(level: Level, site: CallSite<'a>) -> Self {
        Self {
            level,
            site,
            module: None,
        }
    }

    /// An entry at `level` recorded at the caller's location
    #[track_caller]
    pub fn here(level: Level) -> Self {
        Self::new(level, CallSite::caller())
    }

    /// Tags the entry with a module. An empty name means "untagged".
    pub const fn with_module(mut self, module: &'a str) -> Self {
        self.module = if module.is_empty() { None } else { Some(module) };
        self
    }

    /// Severity
    pub fn level(&self) -> Level {
        self.level
    }

    /// Where the call was made
    pub fn site(&self) -> CallSite<'a> {
        self.site
    }

    /// Module tag, if any
    pub fn module(&self) -> Option<&'a str> {
        self.module
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basename_strips_directories() {
        assert_eq!(CallSite::new("src/net/socket.rs", 1).basename(), "socket.rs");
        assert_eq!(CallSite::new("C:\\work\\main.rs", 1).basename(), "main.rs");
        assert_eq!(CallSite::new("lib.rs", 1).basename(), "lib.rs");
    }

    #[test]
    fn test_unknown_file_uses_placeholder() {
        assert_eq!(CallSite::unknown(7).basename(), UNKNOWN_FILE);
        assert_eq!(CallSite::new("", 7).basename(), UNKNOWN_FILE);
    }

    #[test]
    fn test_caller_captures_this_file() {
        let line = line!() + 1;
        let site = CallSite::caller();
        assert_eq!(site.basename(), "entry.rs");
        assert_eq!(site.line(), line);
    }

    #[test]
    fn test_empty_module_means_untagged() {
        let entry = LogEntry::here(Level::Warn).with_module("");
        assert_eq!(entry.module(), None);
        assert_eq!(entry.with_module("alloc").module(), Some("alloc"));
        assert_eq!(entry.level(), Level::Warn);
    }
}
