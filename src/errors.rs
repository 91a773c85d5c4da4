//! Error types for snapshot loading, configuration and locale handling.
//!
//! The aggregation core never returns an error: malformed survey data
//! degrades to an empty or default result (see [`crate::validation`]).
//! `SnapshotError` covers the host side: reading exported documents,
//! parsing configuration and switching languages.
//!
//! # Example
//!
//! ```rust
//! use gp_snapshot::errors::SnapshotError;
//!
//! let err = SnapshotError::no_submission(Some("user-1"));
//! assert!(err.is_user_fixable());
//! assert_eq!(err.to_string(), "no submission found for user 'user-1'");
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the library.
pub type Result<T> = std::result::Result<T, SnapshotError>;

#[derive(Debug, Error)]
pub enum SnapshotError {
    /// File system errors while reading exports or writing output.
    #[error("{message}: {}", .path.display())]
    Io {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The export file is not valid JSON, or a document has the wrong shape.
    #[error("invalid submission document in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file could not be parsed.
    #[error("invalid configuration{}: {message}", .path.as_ref().map(|p| format!(" in {}", p.display())).unwrap_or_default())]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// No submission document matched the requested user.
    #[error("no submission found{}", .user_id.as_ref().map(|u| format!(" for user '{u}'")).unwrap_or_default())]
    NoSubmission { user_id: Option<String> },

    /// Requested language is not one of the configured languages.
    #[error("unsupported language '{language}' (available: {})", .available.join(", "))]
    Locale {
        language: String,
        available: Vec<String>,
    },
}

impl SnapshotError {
    pub fn io(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            message: message.into(),
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    pub fn config(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Config {
            message: message.into(),
            path,
        }
    }

    pub fn no_submission(user_id: Option<&str>) -> Self {
        Self::NoSubmission {
            user_id: user_id.map(str::to_string),
        }
    }

    /// Whether the user can fix this by changing input, flags or config.
    ///
    /// Only I/O failures other than a missing file are treated as
    /// environmental.
    pub fn is_user_fixable(&self) -> bool {
        match self {
            Self::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            Self::Json { .. }
            | Self::Config { .. }
            | Self::NoSubmission { .. }
            | Self::Locale { .. } => true,
        }
    }
}
