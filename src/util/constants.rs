// logtrim - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "logtrim";

/// Application identifier used for config directories.
pub const APP_ID: &str = "logtrim";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Deduplication defaults
// =============================================================================

/// Built-in timestamp/duration alternation.
///
/// Alternatives in priority order (the regex engine prefers earlier branches
/// when two alternatives match at the same position):
///   1. ISO-like date-time:   2025-09-24 18:41:09 / 2025-09-24T18:41:09.123Z
///   2. Abbreviated month:    2025-Sep-24 18:41:09.830218
///   3. Bare time:            18:41:09
///   4. Durations:            10m5s, 30m, 45s
///   5. Syslog date:          Wed Sep 24 18:41:09 2025
///
/// The ISO branch requires the time component; a bare date is never treated
/// as a timestamp.
pub const DEFAULT_TIMESTAMP_PATTERN: &str = concat!(
    r"(?:",
    r"\d{4}-\d{2}-\d{2}(?:[ T]\d{2}:\d{2}:\d{2}(?:\.\d+)?(?:Z|[+-]\d{2}:\d{2})?)",
    r"|",
    r"\d{4}-[A-Z][a-z]{2}-\d{2} \d{2}:\d{2}:\d{2}(?:\.\d+)?",
    r"|",
    r"\b\d{2}:\d{2}:\d{2}\b",
    r"|",
    r"\b\d+m(?:\d+s)?\b",
    r"|",
    r"\b\d+s\b",
    r"|",
    r"[A-Z][a-z]{2} [A-Z][a-z]{2} \d{2} \d{2}:\d{2}:\d{2} \d{4}",
    r")",
);

/// Environment variable consulted for the window size when no `--window-size`
/// flag is given. Precedence: flag > this variable > config file > disabled.
pub const WINDOW_ENV_VAR: &str = "LOGTRIM_WINDOW";

/// Hard upper bound on the window size.
///
/// Every pass re-scans the full text with the timestamp regex, so total work
/// grows linearly with the window. Values above the bound are rejected at the
/// boundary with a warning, never silently clamped inside the core.
pub const ABSOLUTE_MAX_WINDOW_SIZE: usize = 128;

/// Maximum regex pattern length to prevent ReDoS.
pub const MAX_REGEX_PATTERN_LENGTH: usize = 4_096;

// =============================================================================
// Discovery limits (directory mode)
// =============================================================================

/// Maximum directory recursion depth during discovery.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Maximum number of files to process in a single directory run.
pub const DEFAULT_MAX_FILES: usize = 500;

/// Minimum sensible value for the max-files limit.
pub const MIN_MAX_FILES: usize = 1;

/// Hard upper bound on max files (prevents configuration mistakes).
pub const ABSOLUTE_MAX_FILES: usize = 10_000;

/// Hard upper bound on max depth (prevents infinite traversal).
pub const ABSOLUTE_MAX_DEPTH: usize = 50;

/// Default include glob patterns for log file discovery.
pub const DEFAULT_INCLUDE_PATTERNS: &[&str] = &["*.log", "*.log.[0-9]*", "*.txt"];

/// Default exclude glob patterns for log file discovery.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    "*.gz",
    "*.zip",
    "*.bak",
    "*.tmp",
    "node_modules",
    ".git",
    "__pycache__",
];

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
