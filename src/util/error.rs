// logtrim - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; all errors keep the causal chain
// for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all logtrim operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum LogTrimError {
    /// Timestamp pattern compilation or validation failed.
    Pattern(PatternError),

    /// Deduplication input validation failed.
    Dedup(DedupError),

    /// File discovery failed (directory mode).
    Discovery(DiscoveryError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for LogTrimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern(e) => write!(f, "Pattern error: {e}"),
            Self::Dedup(e) => write!(f, "Dedup error: {e}"),
            Self::Discovery(e) => write!(f, "Discovery error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for LogTrimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Pattern(e) => Some(e),
            Self::Dedup(e) => Some(e),
            Self::Discovery(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Pattern errors
// ---------------------------------------------------------------------------

/// Errors related to the timestamp pattern supplied by the user or config.
#[derive(Debug)]
pub enum PatternError {
    /// The regex failed to compile.
    Invalid {
        pattern: String,
        source: regex::Error,
    },

    /// The pattern exceeds the maximum allowed length.
    TooLong { length: usize, max_length: usize },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid { pattern, source } => {
                write!(f, "Invalid timestamp regex '{pattern}': {source}")
            }
            Self::TooLong { length, max_length } => write!(
                f,
                "Timestamp regex is {length} chars, exceeds maximum of {max_length}"
            ),
        }
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Invalid { source, .. } => Some(source),
            Self::TooLong { .. } => None,
        }
    }
}

impl From<PatternError> for LogTrimError {
    fn from(e: PatternError) -> Self {
        Self::Pattern(e)
    }
}

// ---------------------------------------------------------------------------
// Dedup errors
// ---------------------------------------------------------------------------

/// Errors related to deduplication input validation.
#[derive(Debug)]
pub enum DedupError {
    /// A block size of zero was requested. Block sizes are never clamped;
    /// the caller must supply a positive value.
    InvalidBlockSize { block_size: usize },
}

impl fmt::Display for DedupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBlockSize { block_size } => {
                write!(f, "Block size must be positive, got {block_size}")
            }
        }
    }
}

impl std::error::Error for DedupError {}

impl From<DedupError> for LogTrimError {
    fn from(e: DedupError) -> Self {
        Self::Dedup(e)
    }
}

// ---------------------------------------------------------------------------
// Discovery errors
// ---------------------------------------------------------------------------

/// Errors related to file discovery in directory mode.
#[derive(Debug)]
pub enum DiscoveryError {
    /// The root scan path does not exist or is not accessible.
    RootNotFound { path: PathBuf },

    /// The root path is not a directory.
    NotADirectory { path: PathBuf },

    /// Permission denied accessing the root path.
    PermissionDenied { path: PathBuf, source: io::Error },
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootNotFound { path } => {
                write!(f, "Input path '{}' does not exist", path.display())
            }
            Self::NotADirectory { path } => {
                write!(f, "Input path '{}' is not a directory", path.display())
            }
            Self::PermissionDenied { path, source } => {
                write!(
                    f,
                    "Permission denied accessing '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for DiscoveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::PermissionDenied { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<DiscoveryError> for LogTrimError {
    fn from(e: DiscoveryError) -> Self {
        Self::Discovery(e)
    }
}

/// Convenience type alias for logtrim results.
pub type Result<T> = std::result::Result<T, LogTrimError>;
