//! End-to-end runs of the bind workflow against a fake packaging tool.

#![cfg(unix)]

mod common;

use common::{Behavior, fake_packager, tiny_ico, write_inputs};
use file_binder::bundler::{
    BindEvent, BindOutcome, BindRequest, BindState, Binder, CancelHandle, EventSink,
    RecordingSink, Settings, SettingsBuilder,
};
use std::path::Path;
use std::sync::Arc;

fn settings_for(program: &Path) -> Settings {
    SettingsBuilder::new()
        .packager_program(program)
        .build()
        .unwrap()
}

fn finished_count(sink: &RecordingSink) -> usize {
    sink.events()
        .iter()
        .filter(|e| matches!(e, BindEvent::Finished(_)))
        .count()
}

/// Cancels the run as soon as a given progress value is reported.
struct CancelAt {
    percent: u8,
    handle: CancelHandle,
    inner: RecordingSink,
}

impl EventSink for CancelAt {
    fn emit(&self, event: BindEvent) {
        if event == (BindEvent::Progress { percent: self.percent }) {
            self.handle.cancel();
        }
        self.inner.emit(event);
    }
}

#[tokio::test]
async fn completed_run_leaves_only_the_output() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_packager(dir.path(), Behavior::Succeed);
    let inputs = write_inputs(dir.path(), &["a.txt", "b.txt"]);
    let output = dir.path().join("out.exe");
    let request = BindRequest::new(inputs, None, output.clone()).unwrap();

    let binder = Binder::new(settings_for(&tool.program));
    let sink = RecordingSink::new();
    let outcome = binder.bind(&request, &sink).await;

    let BindOutcome::Completed(artifact) = outcome else {
        panic!("expected completion, got {outcome:?}; logs: {:?}", sink.logs());
    };
    assert_eq!(artifact.path, output);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "bound executable\n");
    assert_eq!(artifact.size, "bound executable\n".len() as u64);
    assert_eq!(artifact.checksum.len(), 64);
    assert_eq!(binder.state(), BindState::Completed);

    // Working directory, build directory and build descriptor are all gone.
    let workdir = tool.working_dir();
    assert!(!workdir.exists(), "{} still exists", workdir.display());
    assert!(!dir.path().join("opener_script.spec").exists());
    assert!(!dir.path().join("build").exists());

    assert_eq!(sink.progress(), vec![0, 10, 30, 50, 80, 90, 100]);
    assert_eq!(finished_count(&sink), 1);
    assert!(matches!(
        sink.events().last(),
        Some(BindEvent::Finished(BindOutcome::Completed(_)))
    ));
}

#[tokio::test]
async fn packager_receives_one_file_windowed_build_of_staged_files() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_packager(dir.path(), Behavior::Succeed);
    let inputs = write_inputs(dir.path(), &["a.txt", "b.txt"]);
    let request = BindRequest::new(inputs, None, dir.path().join("out.exe")).unwrap();

    let outcome = Binder::new(settings_for(&tool.program))
        .bind(&request, &RecordingSink::new())
        .await;
    assert!(outcome.is_completed());

    let args = tool.args();
    assert!(args.contains(&"--onefile".to_string()));
    assert!(args.contains(&"--windowed".to_string()));
    assert_eq!(args.iter().filter(|a| *a == "--add-data").count(), 2);
    assert!(!args.iter().any(|a| a.starts_with("--icon")));
    assert!(!args.iter().any(String::is_empty));
    assert!(args.last().unwrap().ends_with("opener_script.py"));

    assert_eq!(tool.staged("a.txt"), "contents of a.txt");
    assert_eq!(tool.staged("b.txt"), "contents of b.txt");

    let launcher = tool.launcher_source();
    let a = launcher.find("'a.txt',").expect("a.txt listed");
    let b = launcher.find("'b.txt',").expect("b.txt listed");
    assert!(a < b);
}

#[tokio::test]
async fn icon_is_passed_as_a_single_flag() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_packager(dir.path(), Behavior::Succeed);
    let inputs = write_inputs(dir.path(), &["a.txt", "b.txt"]);
    let icon = dir.path().join("star.ico");
    std::fs::write(&icon, tiny_ico()).unwrap();
    let request =
        BindRequest::new(inputs, Some(icon.clone()), dir.path().join("out.exe")).unwrap();

    let outcome = Binder::new(settings_for(&tool.program))
        .bind(&request, &RecordingSink::new())
        .await;
    assert!(outcome.is_completed());
    assert!(tool.args().contains(&format!("--icon={}", icon.display())));
}

#[tokio::test]
async fn failing_packager_leaves_existing_output_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_packager(dir.path(), Behavior::Fail);
    let inputs = write_inputs(dir.path(), &["a.txt", "b.txt"]);
    let output = dir.path().join("out.exe");
    std::fs::write(&output, "previous build").unwrap();
    let request = BindRequest::new(inputs, None, output.clone()).unwrap();

    let binder = Binder::new(settings_for(&tool.program));
    let sink = RecordingSink::new();
    let outcome = binder.bind(&request, &sink).await;

    let BindOutcome::Failed { reason } = outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert!(reason.contains("script compilation failed"), "{reason}");
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "previous build");
    assert!(!tool.working_dir().exists());
    assert_eq!(binder.state(), BindState::Failed);

    assert_eq!(sink.progress(), vec![0, 10, 30, 50]);
    assert!(sink.logs().last().unwrap().starts_with("Error: "));
    assert_eq!(finished_count(&sink), 1);
}

#[tokio::test]
async fn missing_artifact_is_a_failure() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_packager(dir.path(), Behavior::SucceedWithoutArtifact);
    let inputs = write_inputs(dir.path(), &["a.txt", "b.txt"]);
    let output = dir.path().join("out.exe");
    let request = BindRequest::new(inputs, None, output.clone()).unwrap();

    let outcome = Binder::new(settings_for(&tool.program))
        .bind(&request, &RecordingSink::new())
        .await;
    assert!(matches!(outcome, BindOutcome::Failed { ref reason } if reason.contains("no executable")));
    assert!(!output.exists());
}

#[tokio::test]
async fn leftover_collaterals_do_not_fail_a_relocated_build() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_packager(dir.path(), Behavior::SucceedWithSpecDirectory);
    let inputs = write_inputs(dir.path(), &["a.txt", "b.txt"]);
    let output = dir.path().join("out.exe");
    let request = BindRequest::new(inputs, None, output.clone()).unwrap();

    let binder = Binder::new(settings_for(&tool.program));
    let sink = RecordingSink::new();
    let outcome = binder.bind(&request, &sink).await;

    let BindOutcome::Completed(artifact) = outcome else {
        panic!("expected completion, got {outcome:?}");
    };
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "bound executable\n");
    assert_eq!(artifact.size, "bound executable\n".len() as u64);
    assert_eq!(sink.progress(), vec![0, 10, 30, 50, 80, 90, 100]);
    assert!(!tool.working_dir().exists());
}

#[tokio::test]
async fn missing_packager_is_a_failure_not_a_panic() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = write_inputs(dir.path(), &["a.txt", "b.txt"]);
    let output = dir.path().join("out.exe");
    let request = BindRequest::new(inputs, None, output.clone()).unwrap();

    let outcome = Binder::new(settings_for(&dir.path().join("bin").join("pyinstaller")))
        .bind(&request, &RecordingSink::new())
        .await;
    assert!(matches!(outcome, BindOutcome::Failed { ref reason } if reason.contains("not found")));
    assert!(!output.exists());
}

#[tokio::test]
async fn cancelled_before_start_never_invokes_packager() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_packager(dir.path(), Behavior::Succeed);
    let inputs = write_inputs(dir.path(), &["a.txt", "b.txt"]);
    let output = dir.path().join("out.exe");
    let request = BindRequest::new(inputs, None, output.clone()).unwrap();

    let binder = Binder::new(settings_for(&tool.program));
    binder.cancel_handle().cancel();
    let sink = RecordingSink::new();
    let outcome = binder.bind(&request, &sink).await;

    assert_eq!(outcome, BindOutcome::Cancelled);
    assert_eq!(binder.state(), BindState::Cancelled);
    assert!(!tool.was_invoked());
    assert!(!output.exists());
    assert!(sink.progress().is_empty());
    assert_eq!(finished_count(&sink), 1);
}

#[tokio::test]
async fn cancel_after_staging_stops_before_packaging() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_packager(dir.path(), Behavior::Succeed);
    let inputs = write_inputs(dir.path(), &["a.txt", "b.txt"]);
    let output = dir.path().join("out.exe");
    let request = BindRequest::new(inputs, None, output.clone()).unwrap();

    let binder = Binder::new(settings_for(&tool.program));
    let sink = CancelAt {
        percent: 50,
        handle: binder.cancel_handle(),
        inner: RecordingSink::new(),
    };
    let outcome = binder.bind(&request, &sink).await;

    assert_eq!(outcome, BindOutcome::Cancelled);
    assert!(!tool.was_invoked());
    assert!(!output.exists());
    assert_eq!(sink.inner.progress(), vec![0, 10, 30, 50]);
}

#[tokio::test]
async fn cancel_during_packaging_does_not_promote_the_build() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_packager(dir.path(), Behavior::Succeed);
    let inputs = write_inputs(dir.path(), &["a.txt", "b.txt"]);
    let output = dir.path().join("out.exe");
    let request = BindRequest::new(inputs, None, output.clone()).unwrap();

    let binder = Binder::new(settings_for(&tool.program));
    let sink = CancelAt {
        percent: 80,
        handle: binder.cancel_handle(),
        inner: RecordingSink::new(),
    };
    let outcome = binder.bind(&request, &sink).await;

    assert_eq!(outcome, BindOutcome::Cancelled);
    assert!(tool.was_invoked());
    assert!(!output.exists());
    assert!(!tool.working_dir().exists());
    assert_eq!(sink.inner.progress(), vec![0, 10, 30, 50, 80]);
}

#[tokio::test]
async fn retry_with_fresh_binder_behaves_like_first_run() {
    let dir = tempfile::tempdir().unwrap();
    let failing = fake_packager(&dir.path().join("failing"), Behavior::Fail);
    let inputs = write_inputs(dir.path(), &["a.txt", "b.txt"]);
    let output = dir.path().join("out.exe");
    let request = BindRequest::new(inputs, None, output.clone()).unwrap();

    let first = Binder::new(settings_for(&failing.program));
    assert!(matches!(
        first.bind(&request, &RecordingSink::new()).await,
        BindOutcome::Failed { .. }
    ));

    // A finished binder refuses to run again.
    let again = first.bind(&request, &RecordingSink::new()).await;
    assert!(matches!(again, BindOutcome::Failed { ref reason } if reason.contains("already run")));

    let working = fake_packager(&dir.path().join("working"), Behavior::Succeed);
    let sink = RecordingSink::new();
    let outcome = Binder::new(settings_for(&working.program))
        .bind(&request, &sink)
        .await;
    assert!(outcome.is_completed());
    assert!(output.is_file());
    assert_eq!(sink.progress(), vec![0, 10, 30, 50, 80, 90, 100]);
}

#[tokio::test]
async fn background_task_streams_events_and_outcome() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_packager(dir.path(), Behavior::Succeed);
    let inputs = write_inputs(dir.path(), &["a.txt", "b.txt"]);
    let request = BindRequest::new(inputs, None, dir.path().join("out.exe")).unwrap();

    let binder = Arc::new(Binder::new(settings_for(&tool.program)));
    let mut task = binder.clone().spawn(request);

    let mut events = Vec::new();
    while let Some(event) = task.events.recv().await {
        events.push(event);
    }
    let outcome = task.handle.await.unwrap();

    assert_eq!(events.last(), Some(&BindEvent::Finished(outcome.clone())));
    assert!(outcome.is_completed());
    assert_eq!(binder.state(), BindState::Completed);

    let percents: Vec<u8> = events
        .iter()
        .filter_map(|e| match e {
            BindEvent::Progress { percent } => Some(*percent),
            _ => None,
        })
        .collect();
    assert!(percents.windows(2).all(|w| w[0] <= w[1]));
}
