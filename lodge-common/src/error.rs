//! Common error types for the lodge services

use thiserror::Error;

/// Common result type for lodge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the lodge services
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Message reported back to import callers.
    ///
    /// Database errors are unwrapped to the driver's own message so that a
    /// failed row reads like `UNIQUE constraint failed: properties.slug`
    /// rather than carrying the sqlx wrapper text.
    pub fn store_message(&self) -> String {
        match self {
            Error::Database(sqlx::Error::Database(db_err)) => db_err.message().to_string(),
            other => other.to_string(),
        }
    }
}
