//! `file_binder check`: report whether the packaging tool is usable.

use crate::bundler::{PackagerStatus, Settings, detect_packager};
use crate::cli::RuntimeConfig;
use crate::error::Result;

pub async fn run(settings: &Settings, runtime_config: &RuntimeConfig) -> Result<i32> {
    match detect_packager(settings).await {
        PackagerStatus::Available { path, version } => {
            runtime_config.success(&format!("Packaging tool {version} at {}", path.display()));
            Ok(0)
        }
        PackagerStatus::Broken { path, reason } => {
            runtime_config.error(&format!(
                "Packaging tool at {} does not work: {reason}",
                path.display()
            ));
            Ok(1)
        }
        PackagerStatus::Missing { reason } => {
            runtime_config.error(&reason);
            Ok(1)
        }
    }
}
