//! `file_binder bind`: run the bind workflow and render its events.

use crate::bundler::{BindEvent, BindOutcome, BindRequest, Binder};
use crate::cli::{RuntimeConfig, args::BindArgs};
use crate::config::FileConfig;
use crate::error::{CliError, Result};
use std::path::Path;
use std::sync::Arc;

/// Exit code for a run stopped by the user, as shells report SIGINT.
pub const EXIT_CANCELLED: i32 = 130;

/// Validates the request, runs the bind on a worker task and waits for it.
///
/// Ctrl-C requests cancellation; the worker stops at its next checkpoint.
pub async fn run(
    args: &BindArgs,
    config: &FileConfig,
    packager: Option<&Path>,
    runtime_config: &RuntimeConfig,
) -> Result<i32> {
    let settings = config.settings(packager)?;
    let request = BindRequest::new(
        args.files.iter().cloned(),
        args.icon.clone(),
        args.output.clone(),
    )?;
    runtime_config.verbose_println(&format!(
        "Binding {} files into {}",
        request.inputs().len(),
        request.output().display()
    ));

    let binder = Arc::new(Binder::new(settings));
    let mut task = binder.spawn(request);
    let mut renderer = Renderer::new(args.json, runtime_config);
    let mut watch_ctrl_c = true;

    loop {
        tokio::select! {
            event = task.events.recv() => match event {
                Some(event) => renderer.render(&event)?,
                None => break,
            },
            signal = tokio::signal::ctrl_c(), if watch_ctrl_c => {
                watch_ctrl_c = false;
                match signal {
                    Ok(()) => {
                        task.cancel.cancel();
                        runtime_config.warn("Cancelling after the current step finishes...");
                    }
                    Err(e) => log::warn!("Cannot listen for Ctrl-C: {e}"),
                }
            }
        }
    }

    let outcome = task.handle.await.map_err(|e| CliError::ExecutionFailed {
        command: "bind".to_string(),
        reason: format!("bind worker stopped unexpectedly: {e}"),
    })?;

    Ok(exit_code(&outcome))
}

/// Maps a terminal outcome to the process exit code.
pub fn exit_code(outcome: &BindOutcome) -> i32 {
    match outcome {
        BindOutcome::Completed(_) => 0,
        BindOutcome::Failed { .. } => 1,
        BindOutcome::Cancelled => EXIT_CANCELLED,
    }
}

struct Renderer<'a> {
    json: bool,
    runtime_config: &'a RuntimeConfig,
    percent: u8,
}

impl<'a> Renderer<'a> {
    fn new(json: bool, runtime_config: &'a RuntimeConfig) -> Self {
        Self {
            json,
            runtime_config,
            percent: 0,
        }
    }

    fn render(&mut self, event: &BindEvent) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(event)?);
            return Ok(());
        }

        match event {
            BindEvent::Progress { percent } => self.percent = *percent,
            BindEvent::Log { message } => self
                .runtime_config
                .progress(&format!("[{:>3}%] {message}", self.percent)),
            BindEvent::Finished(BindOutcome::Completed(artifact)) => {
                self.runtime_config.success(&format!(
                    "Bound file created: {} ({} bytes)",
                    artifact.path.display(),
                    artifact.size
                ));
                self.runtime_config
                    .indent(&format!("SHA256: {}", artifact.checksum));
            }
            BindEvent::Finished(BindOutcome::Cancelled) => {
                self.runtime_config.warn("Binding cancelled, nothing was written")
            }
            BindEvent::Finished(BindOutcome::Failed { reason }) => {
                self.runtime_config.error(&format!("Binding failed: {reason}"))
            }
        }
        Ok(())
    }
}
