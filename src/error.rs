// Error types for crtsh-normalizer
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0
//
// Structured error types built with thiserror. Every normalization failure is
// fatal to the invocation that raised it; retrying is left to the caller.

use std::io;
use thiserror::Error;

/// Main error type for normalization runs
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// Payload is not valid JSON or does not have the expected shape
    #[error("Invalid input format: {message}")]
    InputFormat { message: String },

    /// A required key is absent from a certificate entry or from run metadata
    #[error("Missing field '{field}' in {location}")]
    MissingField { field: String, location: String },

    /// A key is present but holds a value of the wrong type
    #[error("Invalid field '{field}' in {location}: expected {expected}")]
    InvalidField {
        field: String,
        location: String,
        expected: &'static str,
    },

    /// Payload bytes could not be decoded as UTF-8
    #[error("Encoding error: {source}")]
    Encoding {
        #[from]
        source: std::str::Utf8Error,
    },

    /// File system errors while reading payloads or configuration
    #[error("I/O error: {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Invalid configuration or parameters
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// Configuration file could not be parsed
    #[error("Configuration parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration could not be rendered
    #[error("Configuration render error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// A batch worker task panicked or was cancelled
    #[error("Task join error: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl NormalizeError {
    /// Build an `InputFormat` error from anything displayable
    pub fn input_format(message: impl Into<String>) -> Self {
        Self::InputFormat {
            message: message.into(),
        }
    }

    /// Build a `MissingField` error
    pub fn missing_field(field: impl Into<String>, location: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
            location: location.into(),
        }
    }

    /// Build an `Io` error tagged with the path that failed
    pub fn io(path: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the error originates from the payload itself rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InputFormat { .. }
                | Self::MissingField { .. }
                | Self::InvalidField { .. }
                | Self::Encoding { .. }
        )
    }
}

impl From<serde_json::Error> for NormalizeError {
    fn from(err: serde_json::Error) -> Self {
        NormalizeError::InputFormat {
            message: err.to_string(),
        }
    }
}

/// Result type for crtsh-normalizer operations
pub type Result<T> = std::result::Result<T, NormalizeError>;
