//! Settings store - Lists, loads and creates setting files in one directory.

use super::{ProfileKey, Settings, SettingsFile};
use crate::error::{Error, Result};
use crate::report::{self, Report};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Content written by [`SettingsStore::create`], ready for editing.
const EMPTY_SETTINGS: &str = "{}";

/// Directory of `<project>.<environment>.json` setting files.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    dir: PathBuf,
}

impl SettingsStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the setting files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the setting file for `key` (may not exist).
    pub fn path(&self, key: &ProfileKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    /// File names matching `*.*.json`, sorted. Empty when the directory is missing.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Settings directory {:?} does not exist", self.dir);
                return Ok(Vec::new());
            }
            Err(e) => return Err(Error::io(&self.dir, e)),
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(&self.dir, e))?;
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(name) => {
                    warn!("Skipping non UTF-8 file name {:?}", name);
                    continue;
                }
            };
            if ProfileKey::from_file_name(&name).is_some() && entry.path().is_file() {
                files.push(name);
            }
        }

        files.sort();
        Ok(files)
    }

    /// Keys of every setting file, in [`list`](Self::list) order.
    pub fn keys(&self) -> Result<Vec<ProfileKey>> {
        Ok(self
            .list()?
            .iter()
            .filter_map(|name| ProfileKey::from_file_name(name))
            .collect())
    }

    /// Distinct project names.
    pub fn list_projects(&self) -> Result<BTreeSet<String>> {
        Ok(self
            .keys()?
            .into_iter()
            .map(|key| key.project().to_string())
            .collect())
    }

    /// Environments configured for `project`.
    pub fn list_envs(&self, project: &str) -> Result<Vec<String>> {
        let envs: Vec<String> = self
            .keys()?
            .into_iter()
            .filter(|key| key.project() == project)
            .map(|key| key.environment().to_string())
            .collect();

        if envs.is_empty() {
            return Err(Error::ProjectNotFound(project.to_string()));
        }
        Ok(envs)
    }

    pub fn exists(&self, key: &ProfileKey) -> bool {
        self.path(key).is_file()
    }

    /// Load the raw setting file. Required fields are not checked here.
    pub fn load(&self, key: &ProfileKey) -> Result<SettingsFile> {
        let path = self.path(key);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::NotFound(key.to_string()))
            }
            Err(e) => return Err(Error::io(path, e)),
        };

        debug!("Loaded setting file {:?}", path);
        let invalid = |source: serde_json::Error| Error::InvalidFormat {
            key: key.to_string(),
            source,
        };

        let value: Value = serde_json::from_str(&content).map_err(invalid)?;
        SettingsFile::from_json(value).map_err(invalid)
    }

    /// Load and validate the settings for an upload.
    pub fn load_settings(&self, key: &ProfileKey) -> Result<Settings> {
        self.load(key)?.try_into()
    }

    /// Create an empty (`{}`) setting file and return its path.
    pub fn create(&self, key: &ProfileKey) -> Result<PathBuf> {
        self.write_new(key, EMPTY_SETTINGS.as_bytes())
    }

    /// Copy the setting file of `src` to a new file for `dest`.
    pub fn copy(&self, src: &ProfileKey, dest: &ProfileKey) -> Result<PathBuf> {
        let src_path = self.path(src);
        let content = match fs::read(&src_path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::NotFound(src.to_string()))
            }
            Err(e) => return Err(Error::io(src_path, e)),
        };

        let path = self.write_new(dest, &content)?;
        info!("Copied {} to {}", src, dest);
        Ok(path)
    }

    /// Diagnostic report of the setting file for `key`.
    pub fn inspect(&self, key: &ProfileKey) -> Result<Report> {
        report::inspect(self, key)
    }

    fn write_new(&self, key: &ProfileKey, content: &[u8]) -> Result<PathBuf> {
        if self.exists(key) {
            return Err(Error::AlreadyExists(key.to_string()));
        }

        fs::create_dir_all(&self.dir).map_err(|e| Error::io(&self.dir, e))?;

        let path = self.path(key);
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(Error::AlreadyExists(key.to_string()))
            }
            Err(e) => return Err(Error::io(path, e)),
        };
        file.write_all(content).map_err(|e| Error::io(&path, e))?;

        info!("Created setting file {:?}", path);
        Ok(path)
    }
}
