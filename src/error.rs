//! Error types for the route compiler

use thiserror::Error;

/// Result type alias for compiler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while compiling or checking route scripts
#[derive(Error, Debug)]
pub enum Error {
    /// A segment was given without a color token
    #[error("Segment {index} has no color")]
    MissingColor { index: usize },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Segment or config input could not be parsed
    #[error("Failed to parse input: {0}")]
    ParseError(String),

    /// A compiled script threw while being evaluated
    #[error("Script execution failed: {0}")]
    ScriptError(String),

    /// Reading or writing a file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ParseError(err.to_string())
    }
}
