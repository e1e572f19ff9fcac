//! External tool detection and availability checking.

use crate::bundler::{Settings, packager};
use std::path::PathBuf;

/// What is known about the configured packaging tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackagerStatus {
    /// Found and answered `--version`
    Available { path: PathBuf, version: String },
    /// Found but could not report a version
    Broken { path: PathBuf, reason: String },
    /// Not found at all
    Missing { reason: String },
}

impl PackagerStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, PackagerStatus::Available { .. })
    }
}

/// Locates the packaging tool and asks it for its version.
pub async fn detect_packager(settings: &Settings) -> PackagerStatus {
    let path = match packager::locate_packager(settings.packager_program()) {
        Ok(path) => path,
        Err(e) => {
            log::debug!("{e}");
            return PackagerStatus::Missing {
                reason: e.to_string(),
            };
        }
    };

    match packager::packager_version(&path).await {
        Ok(version) => {
            log::info!("✓ {} available: {version}", path.display());
            PackagerStatus::Available { path, version }
        }
        Err(e) => {
            log::warn!(
                "{} found but --version check failed: {e}. Check file permissions.",
                path.display()
            );
            PackagerStatus::Broken {
                path,
                reason: e.to_string(),
            }
        }
    }
}
