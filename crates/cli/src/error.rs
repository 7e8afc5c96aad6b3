//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Page description file not found
    #[error("Page description not found: {path}")]
    PageNotFound { path: String },

    /// Input script could not be read or parsed
    #[error("Invalid input script {path} (line {line}): {message}")]
    Script {
        path: String,
        line: usize,
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn page_not_found(path: impl Into<String>) -> Self {
        Self::PageNotFound { path: path.into() }
    }

    pub fn script(path: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::Script {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
