//! Error types for the split worker

use std::path::PathBuf;
use thiserror::Error;

/// Error codes for programmatic handling by the harness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// E001: Configuration missing or invalid
    E001InvalidConfig,
    /// E002: Directory creation or file write failed
    E002Storage,
    /// E003: Input file unreadable or malformed
    E003InputRead,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E001InvalidConfig => "E001",
            Self::E002Storage => "E002",
            Self::E003InputRead => "E003",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while initializing the worker or splitting a batch.
///
/// None of these are retried internally; they surface to the harness.
#[derive(Debug, Error)]
pub enum SplitError {
    /// Missing or invalid configuration, fatal at startup
    #[error("[{code}] Invalid configuration: {message}")]
    Configuration { code: ErrorCode, message: String },

    /// Directory creation or output write failed
    #[error("[{code}] Storage error at '{}': {reason}", .path.display())]
    Storage {
        code: ErrorCode,
        path: PathBuf,
        reason: String,
    },

    /// Input file could not be read or parsed
    #[error("[{code}] Failed to read input '{}': {reason}", .path.display())]
    InputRead {
        code: ErrorCode,
        path: PathBuf,
        reason: String,
    },
}

impl SplitError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            code: ErrorCode::E001InvalidConfig,
            message: message.into(),
        }
    }

    pub fn storage(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Storage {
            code: ErrorCode::E002Storage,
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn input_read(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::InputRead {
            code: ErrorCode::E003InputRead,
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Configuration { code, .. }
            | Self::Storage { code, .. }
            | Self::InputRead { code, .. } => *code,
        }
    }

    /// Path of the directory or file involved, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Configuration { .. } => None,
            Self::Storage { path, .. } | Self::InputRead { path, .. } => Some(path),
        }
    }
}

/// Result type alias for SplitError
pub type Result<T> = std::result::Result<T, SplitError>;
