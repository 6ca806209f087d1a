//! CLI error types.

use std::fmt;

/// Errors surfaced to the terminal user.
#[derive(Debug)]
pub enum CliError {
    /// A coordinate argument could not be parsed.
    InvalidCoordinate(String),

    /// The Tokio runtime could not be created.
    Runtime(String),

    /// The HTTP client could not be constructed.
    Http(String),

    /// Reading the event stream failed.
    Io(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InvalidCoordinate(msg) => {
                write!(f, "Invalid coordinate: {}", msg)
            }
            CliError::Runtime(msg) => {
                write!(f, "Failed to create async runtime: {}", msg)
            }
            CliError::Http(msg) => {
                write!(f, "Failed to set up HTTP client: {}", msg)
            }
            CliError::Io(msg) => {
                write!(f, "Input error: {}", msg)
            }
        }
    }
}

impl std::error::Error for CliError {}
