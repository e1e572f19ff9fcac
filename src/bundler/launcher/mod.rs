//! Launcher script generation.
//!
//! The launcher is the program embedded in the bound executable. Its only job
//! is to open each bundled file, looked up by base name, with the operating
//! system's default application.

mod template;

use crate::bundler::error::{Context, ErrorExt, Result};
use handlebars::Handlebars;
use serde::Serialize;
use std::path::{Path, PathBuf};
use template::LAUNCHER_TEMPLATE;

/// Subdirectory next to the launcher that holds the staged inputs.
pub(crate) const DATA_DIR: &str = "data";

#[derive(Serialize)]
struct LauncherData {
    files: Vec<String>,
    prefix: String,
    data_dir: String,
}

/// Renders the launcher source for the given base names.
pub fn render_launcher(launcher_name: &str, file_names: &[String]) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars
        .register_template_string("launcher.py", LAUNCHER_TEMPLATE)
        .context("failed to register launcher template")?;

    let data = LauncherData {
        files: file_names.iter().map(|name| python_literal(name)).collect(),
        prefix: format!("{launcher_name}_"),
        data_dir: python_literal(DATA_DIR),
    };

    handlebars
        .render("launcher.py", &data)
        .context("failed to render launcher template")
}

/// Writes `<dir>/<launcher_name>.py` and returns its path.
pub async fn write_launcher(
    dir: &Path,
    launcher_name: &str,
    file_names: &[String],
) -> Result<PathBuf> {
    let source = render_launcher(launcher_name, file_names)?;
    let path = dir.join(format!("{launcher_name}.py"));
    tokio::fs::write(&path, source)
        .await
        .fs_context("writing launcher script", &path)?;
    log::debug!("Wrote launcher script {}", path.display());
    Ok(path)
}

/// Quotes `value` as a single-quoted Python string literal.
fn python_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
