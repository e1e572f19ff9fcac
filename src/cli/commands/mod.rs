//! Subcommand implementations.

pub mod bind;
pub mod check;
pub mod icons;
