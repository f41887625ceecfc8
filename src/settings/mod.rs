//! Setting files - one JSON file per `project.environment` profile.
//!
//! Two shapes of the same data:
//! - [`SettingsFile`]: what is on disk, every field optional
//! - [`Settings`]: validated, required fields guaranteed non-empty

pub mod key;
pub mod store;

pub use key::{validate_key, ProfileKey};
pub use store::SettingsStore;

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Raw content of a setting file. Missing keys are tolerated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsFile {
    /// Path to the private key used by ssh
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pem: Option<String>,
    /// Local folder to upload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local: Option<String>,
    /// Destination, `user@host:/path`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
    /// Patterns passed to `--exclude`, in order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub exclude: Vec<String>,
}

impl SettingsFile {
    /// Read a parsed JSON value. Objects only: a bare array would otherwise
    /// deserialize positionally.
    pub fn from_json(value: Value) -> std::result::Result<Self, serde_json::Error> {
        let map: Map<String, Value> = serde_json::from_value(value)?;
        serde_json::from_value(Value::Object(map))
    }
}

/// `"exclude": null` means the same as a missing key.
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Validated transfer settings for one profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pem: String,
    local: String,
    remote: String,
    exclude: Vec<String>,
}

impl Settings {
    /// Build settings, rejecting empty required fields.
    pub fn new(
        pem: impl Into<String>,
        local: impl Into<String>,
        remote: impl Into<String>,
        exclude: Vec<String>,
    ) -> Result<Self> {
        SettingsFile {
            pem: Some(pem.into()),
            local: Some(local.into()),
            remote: Some(remote.into()),
            exclude,
        }
        .try_into()
    }

    /// Validate a loosely typed JSON value. Only objects are accepted.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Object(map) if !map.is_empty() => {
                let file: SettingsFile = serde_json::from_value(value.clone())
                    .map_err(|e| Error::InvalidSettings(e.to_string()))?;
                file.try_into()
            }
            Value::Object(_) => Err(Error::InvalidSettings("settings are empty".to_string())),
            other => Err(Error::InvalidSettings(format!(
                "expected a JSON object, got {}",
                json_type_name(other)
            ))),
        }
    }

    pub fn pem(&self) -> &str {
        &self.pem
    }

    pub fn local(&self) -> &str {
        &self.local
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }
}

impl TryFrom<SettingsFile> for Settings {
    type Error = Error;

    fn try_from(file: SettingsFile) -> Result<Self> {
        Ok(Self {
            pem: required("pem", file.pem)?,
            local: required("local", file.local)?,
            remote: required("remote", file.remote)?,
            exclude: file.exclude,
        })
    }
}

fn required(field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        Some(_) => Err(Error::InvalidSettings(format!("'{}' is empty", field))),
        None => Err(Error::InvalidSettings(format!("'{}' is missing", field))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assert_invalid(result: Result<Settings>) {
        assert!(
            matches!(result, Err(Error::InvalidSettings(_))),
            "expected InvalidSettings, got {:?}",
            result
        );
    }

    #[test]
    fn test_from_value_valid() {
        let value = json!({
            "pem": "/a/b/site.pem",
            "local": "/a/b/html/",
            "remote": "user@host:/var/www/html/site",
            "exclude": [".env", ".git/"]
        });
        let settings = Settings::from_value(&value).unwrap();
        assert_eq!(settings.pem(), "/a/b/site.pem");
        assert_eq!(settings.exclude(), &[".env".to_string(), ".git/".to_string()]);
    }

    #[test]
    fn test_exclude_defaults_to_empty() {
        let value = json!({"pem": "k.pem", "local": "./", "remote": "u@h:/p"});
        assert!(Settings::from_value(&value).unwrap().exclude().is_empty());
    }

    #[test]
    fn test_rejects_empty_string_and_containers() {
        assert_invalid(Settings::from_value(&json!("")));
        assert_invalid(Settings::from_value(&json!([])));
        assert_invalid(Settings::from_value(&json!({})));
        assert_invalid(Settings::from_value(&json!(null)));
        assert_invalid(Settings::from_value(&json!(["pem", "local"])));
    }

    #[test]
    fn test_rejects_missing_or_empty_fields() {
        assert_invalid(Settings::from_value(&json!({"pem": "k", "local": "l"})));
        assert_invalid(Settings::from_value(
            &json!({"pem": "", "local": "l", "remote": "r"}),
        ));
        assert_invalid(Settings::new("k", "", "r", vec![]));
    }

    #[test]
    fn test_rejects_wrong_field_types() {
        assert_invalid(Settings::from_value(
            &json!({"pem": 1, "local": "l", "remote": "r"}),
        ));
        assert_invalid(Settings::from_value(
            &json!({"pem": "k", "local": "l", "remote": "r", "exclude": "x"}),
        ));
    }

    #[test]
    fn test_null_exclude_is_empty() {
        let value = json!({"pem": "k.pem", "local": "./", "remote": "u@h:/p", "exclude": null});
        let file = SettingsFile::from_json(value.clone()).unwrap();
        assert!(file.exclude.is_empty());
        assert!(Settings::from_value(&value).unwrap().exclude().is_empty());
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        assert!(SettingsFile::from_json(json!([])).is_err());
        assert!(SettingsFile::from_json(json!(["k", "l", "r", []])).is_err());
        assert!(SettingsFile::from_json(json!({"exclude": "x"})).is_err());
    }

    #[test]
    fn test_settings_file_tolerates_missing_keys() {
        let file: SettingsFile = serde_json::from_str("{}").unwrap();
        assert_eq!(file, SettingsFile::default());
        assert_invalid(Settings::try_from(file));
    }
}
