//! Constants used throughout the application.
//!
//! Names, environment variables, file layout and autosave defaults live here so
//! the rest of the crate refers to them consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "quill";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "A date-keyed journal with autosave";

// Logging
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "warn";
/// Log level used when `--verbose` is passed.
pub const VERBOSE_LOG_LEVEL: &str = "debug";
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "quill";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";

// Configuration Keys & Environment Variables
/// Environment variable for the storage directory.
pub const ENV_VAR_QUILL_DIR: &str = "QUILL_DIR";
/// Environment variable for the number of idle ticks before an autosave.
pub const ENV_VAR_QUILL_AUTOSAVE_TICKS: &str = "QUILL_AUTOSAVE_TICKS";
/// Environment variable for the tick period in milliseconds.
pub const ENV_VAR_QUILL_TICK_MS: &str = "QUILL_TICK_MS";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default sub-directory for entries within the user's home directory.
pub const DEFAULT_JOURNAL_SUBDIR: &str = "Documents/diary";

// Autosave
/// Ticks of inactivity after a modification before the buffer is saved.
pub const DEFAULT_AUTOSAVE_TICKS: u32 = 5;
/// Default tick period in milliseconds.
pub const DEFAULT_TICK_MS: u64 = 1000;

// File System Parameters
/// Prefix of every entry file name.
pub const ENTRY_FILE_PREFIX: &str = "diary-";
/// File extension for entries.
pub const ENTRY_FILE_EXTENSION: &str = ".md";
/// POSIX permissions for the storage directory (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;
/// POSIX permissions for entry files (owner read/write).
#[cfg(unix)]
pub const DEFAULT_FILE_PERMISSIONS: u32 = 0o600;

// Date/Time Logic
/// Date format string for ISO date format (YYYY-MM-DD).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Date format string for compact date format (YYYYMMDD).
pub const DATE_FORMAT_COMPACT: &str = "%Y%m%d";
/// Format of the heading shown for the current date, e.g. "Wednesday 01, May 2024".
pub const DATE_LABEL_FORMAT: &str = "%A %d, %B %Y";

// Front end
/// Prefix that marks an input line as a command rather than text.
pub const COMMAND_PREFIX: char = ':';
