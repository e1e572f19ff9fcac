//! Bind workflow library.
//!
//! Turns a validated [`BindRequest`] into one executable that opens every
//! bundled file with its default application.
//!
//! # Example
//!
//! ```no_run
//! use file_binder::bundler::{BindOutcome, BindRequest, Binder, RecordingSink, SettingsBuilder};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let request = BindRequest::new(["a.txt", "b.txt"], None, PathBuf::from("out.exe"))?;
//! let binder = Binder::new(SettingsBuilder::new().build()?);
//! let sink = RecordingSink::new();
//!
//! if let BindOutcome::Completed(artifact) = binder.bind(&request, &sink).await {
//!     println!("{} ({} bytes)", artifact.path.display(), artifact.size);
//! }
//! # Ok(())
//! # }
//! ```

mod builder;
pub mod error;
mod events;
pub mod icon;
mod launcher;
pub mod packager;
mod request;
mod settings;
pub mod utils;

pub use builder::{
    BindState, BindTask, Binder, CancelHandle, PackagerStatus, calculate_sha256, detect_packager,
};
pub use error::{Error, Result};
pub use events::{BindEvent, BindOutcome, BoundArtifact, EventSink, LogSink, Progress, RecordingSink};
pub use launcher::{render_launcher, write_launcher};
pub use request::{BindRequest, MIN_INPUTS, ValidationError};
pub use settings::{PackagerSettings, Settings, SettingsBuilder};
