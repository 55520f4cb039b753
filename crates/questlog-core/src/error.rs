//! Core error types for questlog-core.
//!
//! This module defines the error hierarchy using thiserror. Store errors are
//! the only ones that cross the network boundary; everything else is raised
//! locally before any remote call happens.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for questlog-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Remote task store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors reported by a [`TaskStore`](crate::store::TaskStore).
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend answered with a non-success status.
    #[error("Store rejected request (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The request never produced a usable response.
    #[error("Store transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not have the expected shape.
    #[error("Unexpected store response: {0}")]
    Malformed(String),

    /// The store URL could not be built.
    #[error("Invalid store URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Failure injected by an in-process store.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Missing required configuration key
    #[error("Missing required configuration key: {0}")]
    MissingKey(String),

    /// Home/config directory could not be determined or created
    #[error("Failed to access data directory: {0}")]
    DataDir(String),
}

/// Validation errors raised before any state is touched.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Task name was blank
    #[error("Task name must not be empty")]
    EmptyName,

    /// Deadline was blank
    #[error("Deadline is required")]
    MissingDeadline,

    /// Deadline could not be parsed
    #[error("Unrecognized deadline '{0}' (expected YYYY-MM-DD or YYYY-MM-DDTHH:MM)")]
    UnparseableDeadline(String),

    /// Deadline closer than the minimum lead time
    #[error("Deadline must be at least {min_minutes} minutes from now.")]
    DeadlineTooSoon { min_minutes: i64 },

    /// Unknown task type name
    #[error("Unknown task type '{0}'")]
    UnknownTaskType(String),

    /// Unknown pomodoro mode name
    #[error("Unknown timer mode '{0}'")]
    UnknownMode(String),

    /// Value outside of its allowed range
    #[error("Invalid value for '{field}': {value} (allowed {min}..={max})")]
    OutOfRange {
        field: String,
        value: u32,
        min: u32,
        max: u32,
    },

    /// Index outside a collection
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: String,
        index: usize,
        len: usize,
    },

    /// The sequence must keep at least one entry
    #[error("Timer sequence must keep at least one entry")]
    EmptySequence,
}

/// Failure of the audible completion alert. Never propagated past the
/// sequencer.
#[derive(Error, Debug)]
pub enum AlertError {
    #[error("Alert output unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
