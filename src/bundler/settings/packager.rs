//! Packaging tool configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Program name looked up on `PATH` when no explicit tool is configured.
pub const DEFAULT_PACKAGER: &str = "pyinstaller";

/// How to invoke the external packaging tool.
///
/// # Examples
///
/// ```
/// use file_binder::bundler::PackagerSettings;
///
/// let settings = PackagerSettings {
///     extra_args: vec!["--clean".into()],
///     ..Default::default()
/// };
/// assert_eq!(settings.program.to_str(), Some("pyinstaller"));
/// ```
#[derive(Debug, Clone)]
pub struct PackagerSettings {
    /// Program name or path.
    ///
    /// Bare names are resolved against `PATH`.
    ///
    /// Default: `pyinstaller`
    pub program: PathBuf,

    /// Arguments inserted right before the launcher script path.
    ///
    /// Default: empty
    pub extra_args: Vec<String>,

    /// Kill the tool and fail the run after this long.
    ///
    /// Default: None (wait indefinitely)
    pub timeout: Option<Duration>,
}

impl Default for PackagerSettings {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_PACKAGER),
            extra_args: Vec::new(),
            timeout: None,
        }
    }
}
