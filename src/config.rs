//! Configuration file loading.
//!
//! Layering, lowest first: built-in defaults, the TOML file, then command
//! line flags and environment variables (applied by the CLI).

use crate::bundler::{Settings, SettingsBuilder};
use crate::error::{BinderError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_DIR_NAME: &str = "file_binder";
const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_ICON_DIR: &str = "icons";

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub packager: PackagerSection,
    pub launcher: LauncherSection,
    pub icons: IconsSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackagerSection {
    pub program: Option<PathBuf>,
    pub extra_args: Vec<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LauncherSection {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IconsSection {
    pub directory: Option<PathBuf>,
}

impl FileConfig {
    /// Parses configuration text.
    pub fn parse(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| BinderError::Config {
            path: origin.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Loads the configuration.
    ///
    /// An explicit path must exist. Without one, the per-user file is read
    /// when present and defaults are used otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) if path.is_file() => path,
                _ => {
                    log::debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        log::debug!("Loading config from {}", path.display());
        let text = std::fs::read_to_string(&path).map_err(|e| BinderError::Config {
            path: path.clone(),
            error: e.to_string(),
        })?;
        Self::parse(&text, &path)
    }

    /// Builds workflow settings, letting `packager_override` win over the file.
    pub fn settings(&self, packager_override: Option<&Path>) -> Result<Settings> {
        let mut builder = SettingsBuilder::new()
            .packager_args(self.packager.extra_args.clone())
            .packager_timeout(self.packager.timeout_secs.map(Duration::from_secs));

        if let Some(program) = packager_override.or(self.packager.program.as_deref()) {
            builder = builder.packager_program(program);
        }
        if let Some(name) = &self.launcher.name {
            builder = builder.launcher_name(name.clone());
        }

        Ok(builder.build()?)
    }

    /// Directory searched by `file_binder icons` when none is given.
    pub fn icon_directory(&self) -> PathBuf {
        self.icons
            .directory
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ICON_DIR))
    }
}

/// `<config_dir>/file_binder/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
