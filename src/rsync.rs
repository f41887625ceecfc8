//! Rsync command builder.
//!
//! Renders validated [`Settings`] into a single POSIX shell command line:
//!
//! ```text
//! rsync -ravze "ssh -i '<pem>'" --exclude '<pattern>'... --exclude .DS_Store '<local>' '<remote>'
//! ```
//!
//! Every value coming from a setting file is quoted on its own, so spaces,
//! quotes, `$` or backticks never leave their word. Nothing is executed here.

use crate::error::Result;
use crate::settings::Settings;
use crate::utils::shell::{double_quote, quote};
use serde_json::Value;
use tracing::debug;

const RSYNC_BIN: &str = "rsync";

/// recurse, archive, verbose, compress, remote shell (`-e`)
const RSYNC_FLAGS: &str = "-ravze";

/// Always excluded, after the user patterns. Not configurable.
pub const DEFAULT_EXCLUDES: &[&str] = &[".DS_Store"];

/// An rsync invocation built from one profile.
#[derive(Debug, Clone)]
pub struct Rsync {
    settings: Settings,
    cmd: String,
}

impl Rsync {
    pub fn new(settings: Settings) -> Self {
        let cmd = build(&settings);
        Self { settings, cmd }
    }

    /// Build from a loosely typed JSON value; anything but a complete object is rejected.
    pub fn from_value(value: &Value) -> Result<Self> {
        Ok(Self::new(Settings::from_value(value)?))
    }

    /// The rendered command line.
    pub fn cmd(&self) -> &str {
        &self.cmd
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

/// Remote shell used by rsync, authenticating with the pem file.
fn remote_shell(pem: &str) -> String {
    format!("ssh -i {}", quote(pem))
}

/// Render the rsync command for `settings`.
pub fn build(settings: &Settings) -> String {
    let mut parts: Vec<String> = vec![
        RSYNC_BIN.to_string(),
        RSYNC_FLAGS.to_string(),
        double_quote(&remote_shell(settings.pem())),
    ];

    for pattern in settings.exclude() {
        parts.push(format!("--exclude {}", quote(pattern)));
    }
    for pattern in DEFAULT_EXCLUDES {
        parts.push(format!("--exclude {}", pattern));
    }

    parts.push(quote(settings.local()));
    parts.push(quote(settings.remote()));

    let cmd = parts.join(" ");
    debug!("Built rsync command: {}", cmd);
    cmd
}
