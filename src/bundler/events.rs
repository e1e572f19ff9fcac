//! Progress and log notifications emitted by a bind run.
//!
//! The workflow never talks to a terminal directly. It pushes [`BindEvent`]s
//! into an [`EventSink`]; the CLI is one subscriber, tests are another.

use serde::Serialize;
use std::path::PathBuf;
use std::sync::Mutex;
use tokio::sync::mpsc::UnboundedSender;

/// Fixed progress milestones of the bind workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Progress {
    Started,
    WorkingDirectory,
    LauncherWritten,
    FilesStaged,
    Packaged,
    Relocated,
    CleanedUp,
}

impl Progress {
    /// All milestones in emission order.
    pub const ALL: [Progress; 7] = [
        Progress::Started,
        Progress::WorkingDirectory,
        Progress::LauncherWritten,
        Progress::FilesStaged,
        Progress::Packaged,
        Progress::Relocated,
        Progress::CleanedUp,
    ];

    /// Percentage reported for this milestone.
    pub fn percent(self) -> u8 {
        match self {
            Progress::Started => 0,
            Progress::WorkingDirectory => 10,
            Progress::LauncherWritten => 30,
            Progress::FilesStaged => 50,
            Progress::Packaged => 80,
            Progress::Relocated => 90,
            Progress::CleanedUp => 100,
        }
    }
}

/// The executable produced by a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundArtifact {
    /// Final location, the request's output path
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// Hex-encoded SHA-256 of the file
    pub checksum: String,
}

/// Terminal result of one bind run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BindOutcome {
    Completed(BoundArtifact),
    Cancelled,
    Failed { reason: String },
}

impl BindOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, BindOutcome::Completed(_))
    }
}

/// One notification from the worker to its observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BindEvent {
    Progress { percent: u8 },
    Log { message: String },
    Finished(BindOutcome),
}

/// Receiver side of the workflow's notifications.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: BindEvent);
}

impl EventSink for UnboundedSender<BindEvent> {
    fn emit(&self, event: BindEvent) {
        // Receiver gone means nobody is watching; the run carries on.
        let _ = self.send(event);
    }
}

/// Sink that only forwards log lines to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, event: BindEvent) {
        match event {
            BindEvent::Progress { percent } => log::debug!("progress {percent}%"),
            // Already mirrored by the reporter.
            BindEvent::Log { .. } => {}
            BindEvent::Finished(outcome) => log::info!("bind finished: {outcome:?}"),
        }
    }
}

/// Sink that keeps every event, for headless callers and tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<BindEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far.
    pub fn events(&self) -> Vec<BindEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Progress percentages received so far.
    pub fn progress(&self) -> Vec<u8> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                BindEvent::Progress { percent } => Some(percent),
                _ => None,
            })
            .collect()
    }

    /// Log lines received so far.
    pub fn logs(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                BindEvent::Log { message } => Some(message),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: BindEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

/// Wraps a sink and enforces the event-stream ordering rules.
///
/// Progress never goes backwards and at most one `Finished` event is sent.
pub(crate) struct Reporter<'a> {
    sink: &'a dyn EventSink,
    last: Option<u8>,
    finished: bool,
}

impl<'a> Reporter<'a> {
    pub(crate) fn new(sink: &'a dyn EventSink) -> Self {
        Self {
            sink,
            last: None,
            finished: false,
        }
    }

    pub(crate) fn progress(&mut self, milestone: Progress) {
        let percent = milestone.percent();
        if self.last.is_some_and(|last| percent < last) {
            log::debug!("dropping regressing progress value {percent}");
            return;
        }
        self.last = Some(percent);
        self.sink.emit(BindEvent::Progress { percent });
    }

    pub(crate) fn log(&self, message: impl Into<String>) {
        let message = message.into();
        log::info!("{message}");
        self.sink.emit(BindEvent::Log { message });
    }

    /// Reports a milestone together with its log line.
    pub(crate) fn step(&mut self, milestone: Progress, message: impl Into<String>) {
        self.progress(milestone);
        self.log(message);
    }

    pub(crate) fn finish(&mut self, outcome: BindOutcome) {
        if self.finished {
            return;
        }
        self.finished = true;
        self.sink.emit(BindEvent::Finished(outcome));
    }
}
