//! Packaging tool lookup and probing.

use crate::bundler::error::{Error, ErrorExt, Result};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Resolves the configured packaging tool to an executable path.
///
/// Bare program names are looked up on `PATH`. Anything with a directory
/// component must exist and is made absolute against the current directory,
/// since the tool is later started from inside the working directory.
pub fn locate_packager(program: &Path) -> Result<PathBuf> {
    if program.components().count() > 1 {
        let absolute = program
            .absolutize()
            .fs_context("resolving packaging tool path", program)?;
        return if absolute.is_file() {
            Ok(absolute.into_owned())
        } else {
            Err(Error::GenericError(format!(
                "packaging tool not found at {}",
                program.display()
            )))
        };
    }

    match which::which(program) {
        Ok(path) => {
            log::debug!("Found {} at: {}", program.display(), path.display());
            Ok(path)
        }
        Err(e) => Err(Error::GenericError(format!(
            "{} not found in PATH ({e}). Install it (e.g., pip install pyinstaller) \
             or point --packager at it",
            program.display()
        ))),
    }
}

/// Runs `<tool> --version` and returns its trimmed output.
pub async fn packager_version(path: &Path) -> Result<String> {
    let output = tokio::process::Command::new(path)
        .arg("--version")
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|error| Error::CommandFailed {
            command: path.display().to_string(),
            error,
        })?;

    if !output.status.success() {
        return Err(Error::PackagerFailed {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
