//! Bind workflow orchestration.
//!
//! This module provides the [`Binder`] that runs the fixed bind sequence:
//! working directory, launcher script, staging, packaging, relocation and
//! cleanup.

use crate::bundler::{
    BindEvent, BindOutcome, BindRequest, BoundArtifact, EventSink, Progress, Result, Settings,
    error::{ErrorExt, Error},
    events::Reporter,
    launcher, packager,
    utils::fs,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::checksum::calculate_sha256;

const DIST_DIR: &str = "dist";
const BUILD_DIR: &str = "build";

/// Lifecycle of a [`Binder`].
///
/// `Idle -> Running -> {Completed, Cancelled, Failed}`; there is no way back
/// to `Running`, a retry needs a fresh binder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BindState {
    Idle = 0,
    Running = 1,
    Completed = 2,
    Cancelled = 3,
    Failed = 4,
}

impl BindState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => BindState::Idle,
            1 => BindState::Running,
            2 => BindState::Completed,
            3 => BindState::Cancelled,
            _ => BindState::Failed,
        }
    }
}

impl From<&BindOutcome> for BindState {
    fn from(outcome: &BindOutcome) -> Self {
        match outcome {
            BindOutcome::Completed(_) => BindState::Completed,
            BindOutcome::Cancelled => BindState::Cancelled,
            BindOutcome::Failed { .. } => BindState::Failed,
        }
    }
}

/// Thread-safe handle that requests cancellation of a bind run.
///
/// The flag only ever goes from unset to set. The run notices it at the next
/// checkpoint between steps; a copy or packaging build already underway is
/// allowed to finish.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// A bind running on a background task.
pub struct BindTask {
    /// Progress, log and terminal notifications, in order
    pub events: UnboundedReceiver<BindEvent>,
    /// Resolves to the same outcome carried by the final event
    pub handle: JoinHandle<BindOutcome>,
    /// Cancels the run
    pub cancel: CancelHandle,
}

/// Runs one bind operation.
///
/// # Examples
///
/// ```no_run
/// use file_binder::bundler::{BindRequest, Binder, LogSink, Settings};
/// use std::path::PathBuf;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let request = BindRequest::new(
///     ["report.pdf", "notes.txt"],
///     None,
///     PathBuf::from("bundle.exe"),
/// )?;
/// let binder = Binder::new(Settings::default());
/// let outcome = binder.bind(&request, &LogSink).await;
/// println!("{outcome:?}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Binder {
    settings: Settings,
    cancel: CancellationToken,
    state: AtomicU8,
}

impl Binder {
    /// Creates an idle binder.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            cancel: CancellationToken::new(),
            state: AtomicU8::new(BindState::Idle as u8),
        }
    }

    /// Returns a handle that cancels this binder's run.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            token: self.cancel.clone(),
        }
    }

    pub fn state(&self) -> BindState {
        BindState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Returns a reference to the binder settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs the bind on a background task and streams its events.
    pub fn spawn(self: Arc<Self>, request: BindRequest) -> BindTask {
        let (tx, events) = mpsc::unbounded_channel();
        let cancel = self.cancel_handle();
        let handle = tokio::spawn(async move { self.bind(&request, &tx).await });
        BindTask {
            events,
            handle,
            cancel,
        }
    }

    /// Runs the bind workflow to a terminal outcome.
    ///
    /// Never returns an error: every failure is logged into `sink` and
    /// reported as [`BindOutcome::Failed`]. Exactly one
    /// [`BindEvent::Finished`] is emitted per call.
    pub async fn bind(&self, request: &BindRequest, sink: &dyn EventSink) -> BindOutcome {
        let mut reporter = Reporter::new(sink);

        if self
            .state
            .compare_exchange(
                BindState::Idle as u8,
                BindState::Running as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            let outcome = BindOutcome::Failed {
                reason: "this binder has already run; create a new one to retry".into(),
            };
            reporter.finish(outcome.clone());
            return outcome;
        }

        let outcome = match self.run(request, &mut reporter).await {
            Ok(Some(artifact)) => {
                reporter.log(format!(
                    "Bound executable created at {}",
                    artifact.path.display()
                ));
                BindOutcome::Completed(artifact)
            }
            Ok(None) => {
                reporter.log("Binding cancelled");
                BindOutcome::Cancelled
            }
            Err(e) => {
                reporter.log(format!("Error: {e}"));
                BindOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        self.state
            .store(BindState::from(&outcome) as u8, Ordering::Release);
        reporter.finish(outcome.clone());
        outcome
    }

    /// The step sequence. `Ok(None)` means a checkpoint saw cancellation.
    ///
    /// The working directory is a `TempDir`, so every early return below
    /// removes it together with the packaging tool's build collaterals.
    async fn run(
        &self,
        request: &BindRequest,
        reporter: &mut Reporter<'_>,
    ) -> Result<Option<BoundArtifact>> {
        macro_rules! checkpoint {
            () => {
                if self.cancel.is_cancelled() {
                    return Ok(None);
                }
            };
        }

        checkpoint!();
        reporter.step(Progress::Started, "Starting file binding process...");

        // Step 1: working directory
        let workspace = tempfile::Builder::new()
            .prefix("file_binder_")
            .tempdir()
            .map_err(|e| Error::GenericError(format!("failed to create working directory: {e}")))?;
        let root = workspace.path();
        reporter.step(
            Progress::WorkingDirectory,
            format!("Created working directory {}", root.display()),
        );
        checkpoint!();

        // Step 2: launcher script
        let file_names = request.file_names();
        let launcher_path =
            launcher::write_launcher(root, self.settings.launcher_name(), &file_names).await?;
        reporter.step(
            Progress::LauncherWritten,
            format!("Created launcher script {}", self.settings.launcher_file_name()),
        );
        checkpoint!();

        // Step 3: staging
        let data_dir = root.join(launcher::DATA_DIR);
        tokio::fs::create_dir(&data_dir)
            .await
            .fs_context("creating staging directory", &data_dir)?;
        let mut staged = Vec::with_capacity(request.inputs().len());
        for (input, name) in request.inputs().iter().zip(&file_names) {
            let target = data_dir.join(name);
            fs::copy_file(input, &target).await?;
            log::debug!("Staged {} -> {}", input.display(), target.display());
            staged.push(target);
        }
        reporter.step(
            Progress::FilesStaged,
            format!("Copied {} files into the working directory", staged.len()),
        );
        checkpoint!();

        // Step 4: packaging
        let program = packager::locate_packager(self.settings.packager_program())?;
        let invocation = packager::PackagerInvocation {
            launcher: launcher_path,
            data_files: staged,
            icon: request.icon().map(|p| p.to_path_buf()),
            name: self.settings.launcher_name().to_string(),
            dist_dir: root.join(DIST_DIR),
            work_dir: root.join(BUILD_DIR),
            spec_dir: root.to_path_buf(),
            extra_args: self.settings.packager_args().to_vec(),
        };
        if let Some(icon) = &invocation.icon {
            reporter.log(format!("Using icon {}", icon.display()));
        }
        packager::run_packager(
            &program,
            &invocation,
            root,
            self.settings.packager_timeout(),
        )
        .await?;

        let produced = invocation.artifact_path();
        if !produced.is_file() {
            return Err(Error::GenericError(format!(
                "packaging tool reported success but no executable was found at {}",
                produced.display()
            )));
        }
        let size = tokio::fs::metadata(&produced)
            .await
            .fs_context("reading artifact metadata", &produced)?
            .len();
        let checksum = calculate_sha256(&produced).await?;
        let tool_name = program
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "the packaging tool".into());
        reporter.step(
            Progress::Packaged,
            format!("Created executable with {tool_name}"),
        );
        checkpoint!();

        // Step 5: relocation, the output is final from here on
        fs::move_file(&produced, request.output()).await?;
        reporter.step(
            Progress::Relocated,
            format!("Moved executable to {}", request.output().display()),
        );

        // Step 6: build collaterals. Leftovers are only worth a warning now.
        let spec_file = root.join(self.settings.spec_file_name());
        let cleanup = [
            fs::remove_dir_all(&invocation.work_dir).await,
            fs::remove_file(&spec_file).await,
            fs::remove_dir_all(&invocation.dist_dir).await,
        ];
        for result in cleanup {
            if let Err(e) = result {
                log::warn!("Failed to remove build collateral: {e}");
            }
        }
        if let Err(e) = workspace.close() {
            log::warn!("Failed to remove working directory: {e}");
        }
        reporter.step(Progress::CleanedUp, "Cleaned up temporary files");

        Ok(Some(BoundArtifact {
            path: request.output().to_path_buf(),
            size,
            checksum,
        }))
    }
}
