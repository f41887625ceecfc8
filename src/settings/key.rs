//! Profile keys in the `project.environment` format.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Identity of one setting file: `<project>.<environment>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProfileKey {
    project: String,
    environment: String,
}

impl ProfileKey {
    /// Build a key from its two parts, validating the joined form.
    pub fn new(project: &str, environment: &str) -> Result<Self> {
        Self::parse(&format!("{}.{}", project, environment))
    }

    /// Parse `project.environment`. Exactly one dot, both sides non-empty.
    pub fn parse(key: &str) -> Result<Self> {
        match key.split_once('.') {
            Some((project, environment))
                if !project.is_empty()
                    && !environment.is_empty()
                    && !environment.contains('.') =>
            {
                Ok(Self {
                    project: project.to_string(),
                    environment: environment.to_string(),
                })
            }
            _ => Err(Error::InvalidKey(key.to_string())),
        }
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Setting file name, e.g. `my-site.staging.json`.
    pub fn file_name(&self) -> String {
        format!("{}.json", self)
    }

    /// Recover a key from a setting file name (`proj.env.json`).
    pub fn from_file_name(name: &str) -> Option<Self> {
        name.strip_suffix(".json")
            .and_then(|stem| Self::parse(stem).ok())
    }
}

impl fmt::Display for ProfileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.project, self.environment)
    }
}

impl FromStr for ProfileKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Check whether `key` is a valid `project.environment` key.
pub fn validate_key(key: &str) -> bool {
    ProfileKey::parse(key).is_ok()
}
