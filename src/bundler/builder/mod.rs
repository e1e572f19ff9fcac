//! Bind orchestration and coordination.
//!
//! This module provides the [`Binder`] that runs the bind workflow and the
//! helpers it leans on.
//!
//! # Overview
//!
//! The binder:
//! 1. Creates a scoped working directory
//! 2. Writes the launcher script
//! 3. Stages the input files
//! 4. Runs the packaging tool
//! 5. Moves the executable to the requested output path
//! 6. Removes the packaging tool's build collaterals
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for the bound executable
//! - [`orchestrator`] - Main [`Binder`] struct and the bind workflow
//! - [`tool_detection`] - Packaging tool availability checking

mod checksum;
mod orchestrator;
mod tool_detection;

pub use checksum::calculate_sha256;
pub use orchestrator::{BindState, BindTask, Binder, CancelHandle};
pub use tool_detection::{PackagerStatus, detect_packager};
