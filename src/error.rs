//! Error types shared by the settings store, the rsync builder and the report.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by the aws-upload library.
#[derive(Debug, Error)]
pub enum Error {
    /// The key is not in the `project.environment` format.
    #[error("invalid key '{0}': expected <project>.<environment>")]
    InvalidKey(String),

    /// No settings file exists for the key.
    #[error("no setting file found for '{0}'")]
    NotFound(String),

    /// No settings file exists for any environment of the project.
    #[error("project '{0}' does not exist")]
    ProjectNotFound(String),

    /// A settings file already exists for the key.
    #[error("setting file '{0}' already exists")]
    AlreadyExists(String),

    /// The settings file is not a JSON object.
    #[error("setting file '{key}' is not valid JSON: {source}")]
    InvalidFormat {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The settings are missing a required field or are not an object.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
