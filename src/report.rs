//! Check report - Diagnostic snapshot of a setting file on disk.
//!
//! Only reads and stats; nothing here gates an upload.

use crate::error::{Error, Result};
use crate::settings::{ProfileKey, Settings, SettingsFile, SettingsStore};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Permission mode a pem file is expected to have.
pub const STRICT_PEM_PERMS: &str = "400";

/// Why a setting file failed to parse as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JsonErrorKind {
    /// Malformed JSON
    Syntax,
    /// Invalid data, e.g. a number out of range
    Data,
    /// Unexpected end of input
    Eof,
    /// Could not be read
    Io,
}

impl JsonErrorKind {
    pub fn description(&self) -> &'static str {
        match self {
            Self::Syntax => "Syntax error, malformed JSON",
            Self::Data => "Invalid JSON data",
            Self::Eof => "Unexpected end of JSON input",
            Self::Io => "Cannot read the file",
        }
    }
}

impl From<&serde_json::Error> for JsonErrorKind {
    fn from(e: &serde_json::Error) -> Self {
        use serde_json::error::Category;
        match e.classify() {
            Category::Syntax => Self::Syntax,
            Category::Data => Self::Data,
            Category::Eof => Self::Eof,
            Category::Io => Self::Io,
        }
    }
}

/// State of one setting file and the paths it references.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub key: String,
    /// Absolute path of the setting file
    pub path: PathBuf,
    pub is_valid_json: bool,
    pub json_error: Option<JsonErrorKind>,
    /// Why the parsed file cannot be used for an upload (wrong types, missing fields)
    pub settings_error: Option<String>,
    pub pem: Option<PathBuf>,
    pub pem_exists: bool,
    /// Octal permission bits of the pem file, e.g. "400"
    pub pem_perms: Option<String>,
    pub local: Option<PathBuf>,
    pub local_exists: bool,
}

impl Report {
    /// True when the pem file is readable by its owner only.
    pub fn has_strict_pem_perms(&self) -> bool {
        self.pem_perms.as_deref() == Some(STRICT_PEM_PERMS)
    }
}

/// Build the report for `key`. Fails only when the file does not exist.
///
/// `is_valid_json` only says whether the file parses; a parsed file with the
/// wrong shape or missing fields is described by `settings_error`.
pub fn inspect(store: &SettingsStore, key: &ProfileKey) -> Result<Report> {
    let path = store.path(key);
    if !path.is_file() {
        return Err(Error::NotFound(key.to_string()));
    }

    let (value, json_error) = match fs::read_to_string(&path) {
        Ok(content) => match serde_json::from_str::<Value>(&content) {
            Ok(value) => (Some(value), None),
            Err(e) => (None, Some(JsonErrorKind::from(&e))),
        },
        Err(e) => {
            debug!("Cannot read {:?}: {}", path, e);
            (None, Some(JsonErrorKind::Io))
        }
    };

    let field = |name: &str| {
        value
            .as_ref()
            .and_then(|v| v.get(name))
            .and_then(Value::as_str)
            .map(absolute)
    };
    let pem = field("pem");
    let local = field("local");

    let settings_error = value.and_then(|v| {
        let checked = SettingsFile::from_json(v)
            .map_err(|e| e.to_string())
            .and_then(|file| Settings::try_from(file).map_err(|e| e.to_string()));
        checked.err()
    });

    let pem_exists = pem.as_deref().is_some_and(Path::is_file);
    let pem_perms = pem
        .as_deref()
        .filter(|_| pem_exists)
        .and_then(permission_mode);
    let local_exists = local.as_deref().is_some_and(Path::is_dir);

    let report = Report {
        key: key.to_string(),
        path: absolute_path(&path),
        is_valid_json: json_error.is_none(),
        json_error,
        settings_error,
        pem,
        pem_exists,
        pem_perms,
        local,
        local_exists,
    };
    debug!("Report for {}: {:?}", key, report);
    Ok(report)
}

fn absolute(value: &str) -> PathBuf {
    absolute_path(Path::new(value))
}

fn absolute_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(unix)]
fn permission_mode(path: &Path) -> Option<String> {
    use std::os::unix::fs::PermissionsExt;
    let metadata = fs::metadata(path).ok()?;
    Some(format!("{:o}", metadata.permissions().mode() & 0o777))
}

#[cfg(not(unix))]
fn permission_mode(_path: &Path) -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn key(s: &str) -> ProfileKey {
        ProfileKey::parse(s).unwrap()
    }

    #[test]
    fn test_missing_file() {
        let temp = TempDir::new().unwrap();
        let store = SettingsStore::new(temp.path());
        assert!(matches!(
            inspect(&store, &key("site.prod")),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_invalid_json() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("site.prod.json"), "{ \"pem\": ").unwrap();
        let store = SettingsStore::new(temp.path());

        let report = inspect(&store, &key("site.prod")).unwrap();
        assert!(!report.is_valid_json);
        assert_eq!(report.json_error, Some(JsonErrorKind::Eof));
        assert!(report.pem.is_none());
        assert!(!report.pem_exists);
        assert!(!report.local_exists);
    }

    #[test]
    fn test_syntax_error_kind() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("site.prod.json"), "{ pem }").unwrap();
        let store = SettingsStore::new(temp.path());

        let report = inspect(&store, &key("site.prod")).unwrap();
        assert_eq!(report.json_error, Some(JsonErrorKind::Syntax));
    }

    #[test]
    fn test_non_object_parses_but_is_unusable() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("site.prod.json"), "[]").unwrap();
        let store = SettingsStore::new(temp.path());

        let report = inspect(&store, &key("site.prod")).unwrap();
        assert!(report.is_valid_json);
        assert!(report.json_error.is_none());
        assert!(report.settings_error.is_some());
        assert!(report.pem.is_none());
    }

    #[test]
    fn test_wrong_field_type_keeps_paths() {
        let temp = TempDir::new().unwrap();
        let pem = temp.path().join("site.pem");
        fs::write(&pem, "key").unwrap();
        let content = serde_json::json!({
            "pem": pem,
            "local": temp.path(),
            "remote": "u@h:/r",
            "exclude": "node_modules",
        });
        fs::write(temp.path().join("site.prod.json"), content.to_string()).unwrap();
        let store = SettingsStore::new(temp.path());

        let report = inspect(&store, &key("site.prod")).unwrap();
        assert!(report.is_valid_json);
        assert!(report.json_error.is_none());
        assert!(report.settings_error.is_some());
        assert_eq!(report.pem, Some(pem));
        assert!(report.pem_exists);
        assert_eq!(report.local.as_deref(), Some(temp.path()));
        assert!(report.local_exists);
    }

    #[test]
    fn test_missing_remote_reported() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("site.prod.json"),
            r#"{"pem": "/k.pem", "local": "/l"}"#,
        )
        .unwrap();
        let store = SettingsStore::new(temp.path());

        let report = inspect(&store, &key("site.prod")).unwrap();
        assert!(report.is_valid_json);
        assert!(report.settings_error.unwrap().contains("remote"));
    }

    #[test]
    fn test_missing_referenced_paths() {
        let temp = TempDir::new().unwrap();
        let content = serde_json::json!({
            "pem": temp.path().join("none.pem"),
            "local": temp.path().join("none"),
        });
        fs::write(temp.path().join("site.prod.json"), content.to_string()).unwrap();
        let store = SettingsStore::new(temp.path());

        let report = inspect(&store, &key("site.prod")).unwrap();
        assert!(report.is_valid_json);
        assert_eq!(report.pem, Some(temp.path().join("none.pem")));
        assert!(!report.pem_exists);
        assert!(report.pem_perms.is_none());
        assert!(!report.local_exists);
    }

    #[test]
    #[cfg(unix)]
    fn test_pem_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let pem = temp.path().join("site.pem");
        fs::write(&pem, "key").unwrap();
        fs::set_permissions(&pem, fs::Permissions::from_mode(0o644)).unwrap();

        let content = serde_json::json!({ "pem": pem, "local": temp.path() });
        fs::write(temp.path().join("site.prod.json"), content.to_string()).unwrap();
        let store = SettingsStore::new(temp.path());

        let report = inspect(&store, &key("site.prod")).unwrap();
        assert!(report.pem_exists);
        assert_eq!(report.pem_perms.as_deref(), Some("644"));
        assert!(!report.has_strict_pem_perms());
        assert!(report.local_exists);

        fs::set_permissions(&pem, fs::Permissions::from_mode(0o400)).unwrap();
        let report = store.inspect(&key("site.prod")).unwrap();
        assert!(report.has_strict_pem_perms());
    }

    #[test]
    fn test_relative_paths_resolved() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("site.prod.json"),
            r#"{"pem": "keys/site.pem", "local": "html"}"#,
        )
        .unwrap();
        let store = SettingsStore::new(temp.path());

        let report = inspect(&store, &key("site.prod")).unwrap();
        assert!(report.pem.unwrap().is_absolute());
        assert!(report.local.unwrap().ends_with("html"));
        assert!(report.path.is_absolute());
    }
}
