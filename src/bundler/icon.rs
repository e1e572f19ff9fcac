//! Icon file detection and discovery.

use crate::bundler::error::{ErrorExt, Result};
use image::ImageFormat;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Icon container formats the packaging tool accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    /// Windows `.ico`
    Ico,
    /// macOS `.icns`
    Icns,
}

const ICNS_MAGIC: &[u8; 4] = b"icns";

/// Sniffs the file header and reports which icon format it holds.
///
/// Returns `Ok(None)` for readable files that are not icons.
pub fn detect_icon(path: &Path) -> Result<Option<IconKind>> {
    let mut header = Vec::with_capacity(16);
    std::fs::File::open(path)
        .fs_context("opening icon", path)?
        .take(16)
        .read_to_end(&mut header)
        .fs_context("reading icon", path)?;

    if header.starts_with(ICNS_MAGIC) {
        return Ok(Some(IconKind::Icns));
    }
    // Only the content decides; the extension is ignored.
    let format = image::guess_format(&header).ok();
    Ok((format == Some(ImageFormat::Ico)).then_some(IconKind::Ico))
}

/// Lists `.ico` files directly inside `dir`, sorted by file name.
pub fn list_icons(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut icons = Vec::new();
    for entry in walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let is_ico = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("ico"));
        if entry.file_type().is_file() && is_ico {
            icons.push(entry.into_path());
        }
    }
    Ok(icons)
}
