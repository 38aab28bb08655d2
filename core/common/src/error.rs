//! Common error types for the Kolibri sync agent.

use thiserror::Error;

/// Top-level error type for sync agent operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed.
    #[error("Config error: {0}")]
    Config(String),

    /// Facility lookup failed.
    #[error("Facility error: {0}")]
    Facility(String),

    /// Sync command invocation failed.
    #[error("Sync error: {0}")]
    Sync(String),

    /// Application bootstrap failed.
    #[error("Bootstrap error: {0}")]
    Bootstrap(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias using the common Error.
pub type Result<T> = std::result::Result<T, Error>;
