//! Error types for TextLens.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire TextLens workspace.
///
/// Variants map onto how each failure is handled: validation problems are
/// reported before any request is made, analysis failures are surfaced to the
/// user once (never retried), and persistence failures are recovered locally.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TextLensError {
    /// User input failed validation (empty input, no feature selected, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// The analysis service rejected the request or answered with garbage
    #[error("Analysis error: {message}")]
    Analysis {
        message: String,
        /// Backend-supplied error code, if any
        code: Option<String>,
        /// HTTP status, when the failure came from a response
        status: Option<u16>,
    },

    /// Stored history could not be read or written
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Another analysis is already in flight
    #[error("An analysis is already in progress")]
    Busy,

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TextLensError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an Analysis error without response metadata
    pub fn analysis(message: impl Into<String>) -> Self {
        Self::Analysis {
            message: message.into(),
            code: None,
            status: None,
        }
    }

    /// Creates an Analysis error carrying the HTTP status and backend code
    pub fn analysis_response(
        message: impl Into<String>,
        code: Option<String>,
        status: u16,
    ) -> Self {
        Self::Analysis {
            message: message.into(),
            code,
            status: Some(status),
        }
    }

    /// Creates a Persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an analysis error
    pub fn is_analysis(&self) -> bool {
        matches!(self, Self::Analysis { .. })
    }

    /// Check if this is a persistence error
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }

    /// Check if this is an admission-control refusal
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy)
    }

    /// The message shown to the user for this error.
    ///
    /// Analysis errors surface the backend message verbatim; everything else
    /// uses the `Display` rendering.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Analysis { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for TextLensError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for TextLensError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for TextLensError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for TextLensError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<version_migrate::MigrationError> for TextLensError {
    fn from(err: version_migrate::MigrationError) -> Self {
        // Anything the migrator cannot make sense of is unreadable stored state.
        Self::Persistence(err.to_string())
    }
}

/// A type alias for `Result<T, TextLensError>`.
pub type Result<T> = std::result::Result<T, TextLensError>;
