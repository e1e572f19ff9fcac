//! Shared helpers for the bind workflow.

pub mod fs;
