//! Packaging tool execution.
//!
//! Marshals the one-file build arguments and runs the tool to completion,
//! streaming its output into the log.

use crate::bundler::error::{Error, Result};
use std::collections::VecDeque;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

/// Stderr lines kept for the failure message.
const STDERR_TAIL_LINES: usize = 20;

/// Separator between source and destination in `--add-data`.
#[cfg(windows)]
pub const ADD_DATA_SEPARATOR: &str = ";";
#[cfg(not(windows))]
pub const ADD_DATA_SEPARATOR: &str = ":";

/// Everything the packaging tool needs for one build.
#[derive(Debug, Clone)]
pub struct PackagerInvocation {
    /// Launcher script to compile
    pub launcher: PathBuf,
    /// Files bundled next to the launcher
    pub data_files: Vec<PathBuf>,
    /// Icon for the produced executable
    pub icon: Option<PathBuf>,
    /// Executable name without suffix
    pub name: String,
    /// Where the executable is written
    pub dist_dir: PathBuf,
    /// Intermediate build directory
    pub work_dir: PathBuf,
    /// Where the build descriptor is written
    pub spec_dir: PathBuf,
    /// Extra user arguments, placed before the launcher path
    pub extra_args: Vec<String>,
}

impl PackagerInvocation {
    /// Command line arguments, excluding the program itself.
    ///
    /// The icon flag is left out entirely when no icon is set.
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--noconfirm".into(),
            "--onefile".into(),
            "--windowed".into(),
            "--name".into(),
            self.name.clone().into(),
            "--distpath".into(),
            self.dist_dir.clone().into(),
            "--workpath".into(),
            self.work_dir.clone().into(),
            "--specpath".into(),
            self.spec_dir.clone().into(),
        ];

        for file in &self.data_files {
            let mut spec = OsString::from(file.as_os_str());
            spec.push(ADD_DATA_SEPARATOR);
            spec.push(".");
            args.push("--add-data".into());
            args.push(spec);
        }

        if let Some(icon) = &self.icon {
            let mut flag = OsString::from("--icon=");
            flag.push(icon.as_os_str());
            args.push(flag);
        }

        args.extend(self.extra_args.iter().map(OsString::from));
        args.push(self.launcher.clone().into());
        args
    }

    /// Path the executable appears at after a successful build.
    pub fn artifact_path(&self) -> PathBuf {
        self.dist_dir
            .join(format!("{}{}", self.name, std::env::consts::EXE_SUFFIX))
    }
}

/// Runs the packaging tool and waits for it to exit.
///
/// A non-zero exit status is an error carrying the tail of stderr. With a
/// timeout set, the tool is killed once it runs longer than that.
pub async fn run_packager(
    program: &Path,
    invocation: &PackagerInvocation,
    current_dir: &Path,
    timeout: Option<Duration>,
) -> Result<()> {
    let args = invocation.args();
    log::info!("Running {}...", program.display());
    log::debug!(
        "{} {}",
        program.display(),
        args.iter()
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    );

    let mut command = Command::new(program);
    command
        .args(&args)
        .current_dir(current_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    // Keep the tool out of the terminal's foreground group so Ctrl-C only
    // reaches this process, which turns it into a cancellation request.
    #[cfg(unix)]
    command.process_group(0);

    let mut child = command.spawn().map_err(|error| Error::CommandFailed {
        command: program.display().to_string(),
        error,
    })?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let outcome = {
        let run = async {
            let (_, tail, status) = tokio::join!(
                async {
                    if let Some(stdout) = stdout {
                        drain_lines(stdout, |line| log::debug!("[packager] {line}")).await;
                    }
                },
                async {
                    let mut tail = VecDeque::with_capacity(STDERR_TAIL_LINES);
                    if let Some(stderr) = stderr {
                        drain_lines(stderr, |line| {
                            log::debug!("[packager] {line}");
                            if tail.len() == STDERR_TAIL_LINES {
                                tail.pop_front();
                            }
                            tail.push_back(line);
                        })
                        .await;
                    }
                    tail
                },
                child.wait()
            );
            (tail, status)
        };

        match timeout {
            Some(limit) => tokio::time::timeout(limit, run).await.ok(),
            None => Some(run.await),
        }
    };

    let Some((tail, status)) = outcome else {
        let secs = timeout.map(|t| t.as_secs()).unwrap_or_default();
        log::warn!("Packaging tool timed out after {secs}s, terminating...");
        if let Err(e) = child.kill().await {
            log::warn!("Failed to kill packaging tool: {e}");
        }
        return Err(Error::Timeout(secs));
    };

    let status: ExitStatus = status.map_err(|error| Error::CommandFailed {
        command: program.display().to_string(),
        error,
    })?;

    if !status.success() {
        return Err(Error::PackagerFailed {
            status,
            stderr: Vec::from(tail).join("\n"),
        });
    }

    Ok(())
}

/// Reads `reader` to the end, handing each line to `on_line`.
///
/// Bytes that are not UTF-8 are replaced rather than ending the read; a pipe
/// left undrained would eventually block or kill the tool.
async fn drain_lines<R>(reader: R, mut on_line: impl FnMut(String))
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                on_line(line.trim_end_matches(['\n', '\r']).to_string());
            }
            Err(e) => {
                log::debug!("stopped reading packaging tool output: {e}");
                break;
            }
        }
    }
}
