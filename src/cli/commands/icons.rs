//! `file_binder icons`: list the icons an icon directory offers.

use crate::bundler::icon::list_icons;
use crate::cli::RuntimeConfig;
use crate::error::Result;
use std::path::Path;

/// Prints one `.ico` path per line on stdout.
///
/// A missing directory is reported but is not an error: there are simply no
/// icons to offer.
pub fn run(dir: &Path, runtime_config: &RuntimeConfig) -> Result<i32> {
    if !dir.is_dir() {
        runtime_config.warn(&format!("Icon directory not found: {}", dir.display()));
        return Ok(0);
    }

    let icons = list_icons(dir)?;
    if icons.is_empty() {
        runtime_config.progress(&format!("No .ico files in {}", dir.display()));
    }
    for icon in icons {
        println!("{}", icon.display());
    }
    Ok(0)
}
