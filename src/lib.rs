//! File binder library.
//!
//! Bundles a set of files into one self-extracting executable which, when
//! run, opens each bundled file with the operating system's default
//! application. The executable itself is produced by an external packaging
//! tool (PyInstaller by default).
//!
//! It can be used both as a CLI tool and as a library dependency; see
//! [`bundler`] for the headless workflow.

pub mod bundler;
pub mod cli;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use error::{BinderError, CliError, Result};
