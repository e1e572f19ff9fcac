//! Command line interface for file_binder.
//!
//! This module is the presentation layer: it turns arguments into a bind
//! request, drives the workflow and renders what it reports.

mod args;
pub mod commands;
mod output;

pub use args::{Args, BindArgs, Command, RuntimeConfig};
pub use output::OutputManager;

use crate::config::FileConfig;
use crate::error::Result;

/// Main CLI entry point: runs parsed arguments and returns the exit code.
pub async fn run(args: &Args) -> Result<i32> {
    let runtime_config = RuntimeConfig::from(args);
    let config = FileConfig::load(args.config.as_deref())?;

    match &args.command {
        Command::Bind(bind_args) => {
            commands::bind::run(bind_args, &config, args.packager.as_deref(), &runtime_config)
                .await
        }
        Command::Icons { dir } => {
            let dir = dir.clone().unwrap_or_else(|| config.icon_directory());
            commands::icons::run(&dir, &runtime_config)
        }
        Command::Check => {
            let settings = config.settings(args.packager.as_deref())?;
            commands::check::run(&settings, &runtime_config).await
        }
    }
}
