//! External packaging tool integration.
//!
//! The packaging tool (PyInstaller by default) compiles the launcher script
//! plus the staged data files into one native executable. It is treated as
//! an opaque collaborator: this module only finds it, marshals its
//! arguments and checks its exit status.
//!
//! # Module Organization
//!
//! - `toolset` - locating the tool and probing its version
//! - `build` - argument marshaling and execution

mod build;
mod toolset;

pub use build::{ADD_DATA_SEPARATOR, PackagerInvocation, run_packager};
pub use toolset::{locate_packager, packager_version};
