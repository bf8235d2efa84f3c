//! Error types for Encore
//!
//! Provides standardized error handling across the palette. None of these
//! escape the palette's input handlers; they are logged or folded into the
//! controller's `error` state.

use thiserror::Error;

/// Errors that can occur in Encore
#[derive(Debug, Error)]
pub enum EncoreError {
    /// Remote catalog search failed (network or server error)
    #[error("Search gateway error: {0}")]
    Gateway(String),

    /// Playback collaborator rejected a request
    #[error("Playback error: {0}")]
    Playback(String),

    /// Navigation collaborator rejected a request
    #[error("Navigation error: {0}")]
    Navigation(String),

    /// Settings or help collaborator rejected a request
    #[error("Command error: {0}")]
    Command(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Recents persistence errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding/decoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for Encore operations
pub type EncoreResult<T> = Result<T, EncoreError>;
