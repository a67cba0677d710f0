//! Logging configuration

use crate::level::Level;

/// Maximum number of module names the filter table can hold
pub const MAX_MODULES: usize = 32;

/// Storage per module name, including one reserved byte (names are at most 31 bytes)
pub const MODULE_NAME_CAPACITY: usize = 32;

/// Storage for the prefix tag, including one reserved byte (prefix is at most 63 bytes)
pub const PREFIX_CAPACITY: usize = 64;

/// Prefix tag used until `set_prefix` is called
pub const DEFAULT_PREFIX: &str = "==ct==";

/// Default minimum log level
pub const DEFAULT_LOG_LEVEL: Level = Level::Info;

/// Startup default for the minimum level (`info`, `warn` or `error`)
pub const ENV_LOG_LEVEL: &str = "CT_LOG_LEVEL";

/// Startup default for the module filter (`alloc,trace,...`)
pub const ENV_MODULES: &str = "CT_DEBUG";

/// Disables colour output when set to any value
pub const ENV_NO_COLOR: &str = "NO_COLOR";

/// Written in place of a line whose message could not be formatted
pub const FORMAT_ERROR_LINE: &str = "coretrace: log format error\n";

/// Printed for call sites whose file is unknown
pub const UNKNOWN_FILE: &str = "<unknown>";
