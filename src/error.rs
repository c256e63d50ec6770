//! Error types for the chain of density summarizer
//!
//! This module defines the error taxonomy used throughout the application,
//! using `thiserror` for ergonomic error handling. Nothing is retried or
//! recovered locally: every error travels up to `main` and ends the process.

use thiserror::Error;

/// Main error type for summarizer operations
///
/// The first four variants form the user-facing taxonomy (input file,
/// configuration, credentials, remote service). The remaining variants wrap
/// I/O and JSON errors so `?` works at the boundaries.
#[derive(Error, Debug)]
pub enum CodError {
    /// The input article could not be opened or read
    #[error("File access error: {0}")]
    FileAccess(String),

    /// Invalid configuration, malformed arguments, or an unknown model
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Missing or rejected API credential
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Transport failure, non-success status, or a response that does not
    /// match the requested schema
    #[error("Remote service error: {0}")]
    RemoteService(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for summarizer operations
///
/// Uses `anyhow::Error` so callers can attach context while still being able
/// to `downcast_ref::<CodError>()` to recover the taxonomy.
pub type Result<T> = anyhow::Result<T>;
