//! Error types for the bind workflow.
//!
//! Every failure inside a bind run is one of these variants. The workflow
//! boundary flattens them into a single log line, so the `Display` text is
//! what users end up reading.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
    process::ExitStatus,
};
use thiserror::Error;

/// Result type alias for bundler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while binding files.
#[derive(Error, Debug)]
pub enum Error {
    /// Free-form failure with a ready-made message
    #[error("{0}")]
    GenericError(String),

    /// Raw IO error without path context
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// Filesystem operation failed on a specific path
    #[error("{context} {}: {error}", .path.display())]
    Fs {
        /// What was being done
        context: String,
        /// Path the operation touched
        path: PathBuf,
        /// Underlying error
        error: io::Error,
    },

    /// A subprocess could not be spawned or waited on
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Program that was invoked
        command: String,
        /// Underlying error
        error: io::Error,
    },

    /// The packaging tool ran but reported failure
    #[error("packaging tool exited with {status}{}", stderr_suffix(.stderr))]
    PackagerFailed {
        /// Exit status reported by the tool
        status: ExitStatus,
        /// Last lines of the tool's stderr
        stderr: String,
    },

    /// The packaging tool did not finish in time and was killed
    #[error("packaging tool timed out after {0} seconds")]
    Timeout(u64),

    /// Directory traversal failed
    #[error("{0}")]
    WalkDir(#[from] walkdir::Error),
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.trim().is_empty() {
        String::new()
    } else {
        format!(":\n{}", stderr.trim_end())
    }
}

/// Attaches a filesystem context and path to IO results.
pub trait ErrorExt<T> {
    /// Wraps an IO error as [`Error::Fs`].
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context: context.to_string(),
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Converts options and foreign errors into [`Error::GenericError`].
pub trait Context<T> {
    /// Attaches a message, keeping the source error text when there is one.
    fn context<C: Display>(self, context: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }
}

impl<T, E: Display> Context<T> for std::result::Result<T, E> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{context}: {e}")))
    }
}
