//! Error types for the command line front end.
//!
//! The bind workflow itself never surfaces these: it reports failures as a
//! [`BindOutcome`](crate::bundler::BindOutcome). These cover what happens
//! around a run: argument handling, configuration and request validation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BinderError>;

/// Main error type for the command line front end
#[derive(Error, Debug)]
pub enum BinderError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// Rejected bind request
    #[error("{0}")]
    Validation(#[from] crate::bundler::ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file errors
    #[error("config error in {}: {error}", .path.display())]
    Config {
        /// File being read
        path: PathBuf,
        /// What went wrong
        error: String,
    },

    /// Bundler errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] crate::bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}
