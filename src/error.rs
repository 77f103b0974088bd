use std::path::PathBuf;

use thiserror::Error;

use crate::domain::RefKind;

/// Unified error type for doc-versions operations
#[derive(Error, Debug)]
pub enum DocVersionsError {
    #[error("Invalid {kind} name '{name}': expected {expected}")]
    Format {
        kind: RefKind,
        name: String,
        expected: &'static str,
    },

    #[error("Could not find the version directory: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("A higher or equal pre-release already exists for {target}: {}", existing.join(", "))]
    OrderingViolation {
        target: String,
        existing: Vec<String>,
    },

    #[error("No stable version published under {}", .0.display())]
    NoStableVersion(PathBuf),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in doc-versions
pub type Result<T> = std::result::Result<T, DocVersionsError>;

impl DocVersionsError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        DocVersionsError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        DocVersionsError::Version(msg.into())
    }

    /// Create a reference format error for the given kind
    pub fn format(kind: RefKind, name: impl Into<String>) -> Self {
        DocVersionsError::Format {
            kind,
            name: name.into(),
            expected: kind.expected_pattern(),
        }
    }
}
