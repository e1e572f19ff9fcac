//! Bind request construction and validation.
//!
//! A [`BindRequest`] can only be obtained through [`BindRequest::new`], so
//! every request that reaches the workflow already satisfies its
//! preconditions. Rejections here never start a run.

use super::icon::{IconKind, detect_icon};
use path_absolutize::Absolutize;
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Minimum number of files a bind needs.
pub const MIN_INPUTS: usize = 2;

/// Reasons a bind request is rejected before any work starts.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("at least {min} files are required to bind, got {0}", min = MIN_INPUTS)]
    TooFewInputs(usize),

    #[error("input file not found: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("input is not a regular file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("input file cannot be read: {}: {error}", .path.display())]
    Unreadable {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("file listed twice: {}", .0.display())]
    DuplicateInput(PathBuf),

    #[error("two inputs share the file name {0:?}; bundled files are opened by name")]
    NameCollision(String),

    #[error("output path is empty")]
    MissingOutput,

    #[error("output path is a directory: {}", .0.display())]
    OutputIsDirectory(PathBuf),

    #[error("output directory does not exist: {}", .0.display())]
    OutputParentMissing(PathBuf),

    #[error("icon not found: {}", .0.display())]
    MissingIcon(PathBuf),

    #[error("not an .ico or .icns file: {}", .0.display())]
    NotAnIcon(PathBuf),

    #[error("could not resolve path {}: {error}", .path.display())]
    Path {
        path: PathBuf,
        error: std::io::Error,
    },
}

/// Immutable description of one bind run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindRequest {
    inputs: Vec<PathBuf>,
    icon: Option<PathBuf>,
    output: PathBuf,
}

impl BindRequest {
    /// Validates and builds a request.
    ///
    /// Paths are made absolute against the current directory so the
    /// request stays meaningful wherever the workflow runs.
    ///
    /// # Errors
    ///
    /// See [`ValidationError`]: fewer than two inputs, missing, unreadable or
    /// duplicate inputs, inputs sharing a base name, a bad output path, or an
    /// icon that is missing or not in an icon format.
    pub fn new<I, P>(
        inputs: I,
        icon: Option<PathBuf>,
        output: PathBuf,
    ) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let raw: Vec<PathBuf> = inputs.into_iter().map(Into::into).collect();
        if raw.len() < MIN_INPUTS {
            return Err(ValidationError::TooFewInputs(raw.len()));
        }

        let mut seen_paths = HashSet::new();
        let mut seen_names: HashSet<OsString> = HashSet::new();
        let mut inputs = Vec::with_capacity(raw.len());
        for path in raw {
            let path = absolute(&path)?;
            check_readable_file(&path)?;

            if !seen_paths.insert(path.clone()) {
                return Err(ValidationError::DuplicateInput(path));
            }
            let name = path
                .file_name()
                .ok_or_else(|| ValidationError::NotAFile(path.clone()))?
                .to_os_string();
            if !seen_names.insert(name.clone()) {
                return Err(ValidationError::NameCollision(
                    name.to_string_lossy().into_owned(),
                ));
            }
            inputs.push(path);
        }

        if output.as_os_str().is_empty() {
            return Err(ValidationError::MissingOutput);
        }
        let output = absolute(&output)?;
        if output.is_dir() {
            return Err(ValidationError::OutputIsDirectory(output));
        }
        match output.parent() {
            Some(parent) if parent.is_dir() => {}
            Some(parent) => return Err(ValidationError::OutputParentMissing(parent.to_path_buf())),
            None => return Err(ValidationError::OutputIsDirectory(output)),
        }

        let icon = match icon {
            Some(icon) => {
                let icon = absolute(&icon)?;
                if !icon.is_file() {
                    return Err(ValidationError::MissingIcon(icon));
                }
                match detect_icon(&icon) {
                    Ok(Some(IconKind::Ico | IconKind::Icns)) => Some(icon),
                    Ok(None) | Err(_) => return Err(ValidationError::NotAnIcon(icon)),
                }
            }
            None => None,
        };

        Ok(Self {
            inputs,
            icon,
            output,
        })
    }

    /// Input files in the order they were given.
    pub fn inputs(&self) -> &[PathBuf] {
        &self.inputs
    }

    /// Base names the inputs are staged and opened under.
    pub fn file_names(&self) -> Vec<String> {
        self.inputs
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect()
    }

    pub fn icon(&self) -> Option<&Path> {
        self.icon.as_deref()
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}

fn absolute(path: &Path) -> Result<PathBuf, ValidationError> {
    path.absolutize()
        .map(|p| p.into_owned())
        .map_err(|error| ValidationError::Path {
            path: path.to_path_buf(),
            error,
        })
}

fn check_readable_file(path: &Path) -> Result<(), ValidationError> {
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ValidationError::MissingInput(path.to_path_buf()));
        }
        Err(error) => {
            return Err(ValidationError::Unreadable {
                path: path.to_path_buf(),
                error,
            });
        }
    };
    if !metadata.is_file() {
        return Err(ValidationError::NotAFile(path.to_path_buf()));
    }
    std::fs::File::open(path).map_err(|error| ValidationError::Unreadable {
        path: path.to_path_buf(),
        error,
    })?;
    Ok(())
}
