//! Core error types for medicycle-core.
//!
//! This module defines the error hierarchy using thiserror. Two failure
//! classes deliberately do not appear here: a corrupt or missing persisted
//! document (the store falls back to an empty default) and a failed
//! notification emission (swallowed by the notifier).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for medicycle-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Store-related errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Import-related errors
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Access guard errors
    #[error("Access error: {0}")]
    Access(#[from] AccessError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Referenced profile does not exist
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    /// Referenced medicine does not exist
    #[error("Medicine not found: {0}")]
    MedicineNotFound(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Store-specific errors.
///
/// Note that a failed *read* of the document is not represented here:
/// `Store::load` degrades to the default document instead of erroring.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to resolve or create the data directory
    #[error("Failed to prepare data directory: {0}")]
    DataDir(String),

    /// Failed to write a persisted record
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to encode the document
    #[error("Failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Import-specific errors. A failed import leaves the persisted document
/// and the verification marker untouched.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Payload has no usable `profiles` field
    #[error("Invalid file: missing 'profiles' field")]
    MissingProfiles,

    /// Payload is not valid JSON or does not match the document shape
    #[error("Invalid file: {0}")]
    Parse(#[source] serde_json::Error),

    /// Replacing the persisted document failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Access guard errors.
#[derive(Error, Debug)]
pub enum AccessError {
    /// Presented secret does not match the profile's passkey
    #[error("Wrong passkey")]
    WrongPasskey,

    /// Persisting the verified marker failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },
}

/// Validation errors for user-entered records.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Weekly cycle with no weekdays selected
    #[error("weekly cycle requires at least one weekday")]
    EmptyWeekDays,

    /// Monthly cycle with an out-of-range day
    #[error("month day must be between 1 and 31, got {0}")]
    MonthDayOutOfRange(u8),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
