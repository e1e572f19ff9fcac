//! Configuration structures for bind operations.
//!
//! Settings describe how a bind run talks to the packaging tool and how the
//! launcher is named. They are independent of any single [`BindRequest`],
//! so one [`Settings`] value can drive many runs.
//!
//! [`BindRequest`]: crate::bundler::BindRequest

mod builder;
mod core;
mod packager;

pub use builder::SettingsBuilder;
pub use core::Settings;
pub use packager::PackagerSettings;
