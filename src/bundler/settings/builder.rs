//! Builder for constructing Settings.

use super::{PackagerSettings, Settings};
use crate::bundler::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub(super) const DEFAULT_LAUNCHER_NAME: &str = "opener_script";

/// Builder for constructing [`Settings`].
///
/// # Examples
///
/// ```
/// use file_binder::bundler::SettingsBuilder;
///
/// # fn example() -> file_binder::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .packager_program("/opt/python/bin/pyinstaller")
///     .packager_args(vec!["--clean".into()])
///     .launcher_name("open_all")
///     .build()?;
/// assert_eq!(settings.launcher_file_name(), "open_all.py");
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    packager: PackagerSettings,
    launcher_name: Option<String>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the packaging tool program name or path.
    ///
    /// Default: `pyinstaller`
    pub fn packager_program<P: AsRef<Path>>(mut self, program: P) -> Self {
        self.packager.program = program.as_ref().to_path_buf();
        self
    }

    /// Sets extra arguments passed to the packaging tool.
    pub fn packager_args(mut self, args: Vec<String>) -> Self {
        self.packager.extra_args = args;
        self
    }

    /// Sets the packaging tool timeout.
    pub fn packager_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.packager.timeout = timeout;
        self
    }

    /// Sets the launcher name.
    ///
    /// Default: `opener_script`
    pub fn launcher_name<S: Into<String>>(mut self, name: S) -> Self {
        self.launcher_name = Some(name.into());
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the launcher name is empty or contains anything
    /// other than ASCII letters, digits, `_` and `-`, or if the packager
    /// program is empty.
    pub fn build(self) -> Result<Settings> {
        let launcher_name = self
            .launcher_name
            .unwrap_or_else(|| DEFAULT_LAUNCHER_NAME.to_string());

        let valid = !launcher_name.is_empty()
            && launcher_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(Error::GenericError(format!(
                "invalid launcher name {launcher_name:?}: use letters, digits, '_' or '-'"
            )));
        }

        if self.packager.program == PathBuf::new() {
            return Err(Error::GenericError("packager program is empty".into()));
        }

        Ok(Settings::new(self.packager, launcher_name))
    }
}
