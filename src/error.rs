//! Unified error types for Dojo with fail-open handling of the results log.
//!
//! The persisted results log is never allowed to take a study session down:
//! an unreadable log reads as empty and a failed append is logged and
//! skipped. Everything else (bad datasets, controller misuse) is reported as
//! a regular error.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Dojo operations.
#[derive(Error, Debug)]
pub enum DojoError {
    /// I/O errors from the results log or dataset files.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON or TOML parsing/serialization errors.
    #[error("serialization error: {message}")]
    Serde { message: String },

    /// Configuration loading errors.
    #[error("config error: {message}")]
    Config { message: String },

    /// The word or grammar tables are unusable.
    #[error("dataset error: {message}")]
    Dataset { message: String },

    /// A session controller was driven from the wrong phase.
    #[error("invalid state: {message}")]
    InvalidState { message: String },
}

/// A specialized Result type for Dojo operations.
pub type Result<T> = std::result::Result<T, DojoError>;

impl DojoError {
    /// Create a storage error from an I/O error.
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Create a serialization error.
    pub fn serde(message: impl Into<String>) -> Self {
        Self::Serde {
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a dataset error.
    pub fn dataset(message: impl Into<String>) -> Self {
        Self::Dataset {
            message: message.into(),
        }
    }

    /// Create an invalid state error.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }
}

impl From<io::Error> for DojoError {
    fn from(err: io::Error) -> Self {
        Self::Storage {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for DojoError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde {
            message: err.to_string(),
        }
    }
}

/// Trait for fail-open error handling.
///
/// Logs the error as a warning and substitutes a fallback value.
pub trait FailOpen<T> {
    /// Handle an error by logging a warning and returning the default value.
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default;
}

impl<T> FailOpen<T> for Result<T> {
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (fail-open: using default)", context, err);
                T::default()
            }
        }
    }
}

/// Process exit codes for the `dojo` binary.
pub mod exit_codes {
    /// The command completed.
    pub const SUCCESS: i32 = 0;

    /// The command ran but reported a failure (e.g. reset without `--yes`).
    pub const ERROR: i32 = 1;

    /// The binary panicked.
    pub const CRASH: i32 = 3;
}
