//! Error types for the hand cursor control library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Filter construction or processing error
    #[error("Filter error: {0}")]
    FilterError(String),

    /// Cursor control operation failed
    #[error("Cursor control error: {0}")]
    CursorControl(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Landmark frame decoding error
    #[error("Frame error: {0}")]
    FrameError(String),
}

/// Application-specific error type (alias for main Error type)
pub type AppError = Error;

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
