//! Core Settings struct.

use super::PackagerSettings;
use std::path::Path;
use std::time::Duration;

/// Settings shared by every bind run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder).
#[derive(Clone, Debug)]
pub struct Settings {
    packager: PackagerSettings,

    /// File stem of the launcher script and of the packaged executable.
    launcher_name: String,
}

impl Settings {
    pub(super) fn new(packager: PackagerSettings, launcher_name: String) -> Self {
        Self {
            packager,
            launcher_name,
        }
    }

    /// Returns the packaging tool program.
    pub fn packager_program(&self) -> &Path {
        &self.packager.program
    }

    /// Returns extra arguments for the packaging tool.
    pub fn packager_args(&self) -> &[String] {
        &self.packager.extra_args
    }

    /// Returns the packaging tool timeout, if any.
    pub fn packager_timeout(&self) -> Option<Duration> {
        self.packager.timeout
    }

    /// Returns the launcher name, e.g. `opener_script`.
    pub fn launcher_name(&self) -> &str {
        &self.launcher_name
    }

    /// Returns the launcher script's file name, e.g. `opener_script.py`.
    pub fn launcher_file_name(&self) -> String {
        format!("{}.py", self.launcher_name)
    }

    /// Returns the build descriptor the packaging tool writes.
    pub fn spec_file_name(&self) -> String {
        format!("{}.spec", self.launcher_name)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(
            PackagerSettings::default(),
            super::builder::DEFAULT_LAUNCHER_NAME.to_string(),
        )
    }
}
