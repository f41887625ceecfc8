//! aws-upload core library
//!
//! Upload a local folder to a remote host with rsync, driven by JSON setting
//! files named `<project>.<environment>.json`.
//!
//! - [`SettingsStore`]: list, load, create and copy setting files
//! - [`Rsync`]: render validated [`Settings`] into an rsync command line
//! - [`Report`]: diagnostic snapshot of a setting file on disk
//!
//! The library never prints nor runs the command; that is left to the binary.

pub mod config;
pub mod error;
pub mod report;
pub mod rsync;
pub mod settings;
pub mod utils;

// Re-export main types
pub use error::{Error, Result};
pub use report::{inspect, JsonErrorKind, Report};
pub use rsync::{build, Rsync};
pub use settings::{validate_key, ProfileKey, Settings, SettingsFile, SettingsStore};
