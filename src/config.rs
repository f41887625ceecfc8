//! Config module - Resolves the directory holding the setting files.
//!
//! Resolution order:
//! - explicit override (the `--home` flag)
//! - `AWS_UPLOAD_HOME` environment variable
//! - `~/.aws-upload`

use std::path::PathBuf;

/// Environment variable overriding the settings directory.
pub const ENV_HOME: &str = "AWS_UPLOAD_HOME";

const DEFAULT_DIR_NAME: &str = ".aws-upload";

/// Get default settings directory (~/.aws-upload/).
pub fn default_settings_dir() -> PathBuf {
    dirs::home_dir()
        .map(|d| d.join(DEFAULT_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".").join(DEFAULT_DIR_NAME))
}

/// Resolve the settings directory from an optional override and the environment.
pub fn settings_dir(override_dir: Option<PathBuf>) -> PathBuf {
    resolve(override_dir, std::env::var(ENV_HOME).ok())
}

fn resolve(override_dir: Option<PathBuf>, env_home: Option<String>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir;
    }

    match env_home {
        Some(home) if !home.trim().is_empty() => PathBuf::from(home),
        _ => default_settings_dir(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins() {
        let dir = resolve(
            Some(PathBuf::from("/tmp/flag")),
            Some("/tmp/env".to_string()),
        );
        assert_eq!(dir, PathBuf::from("/tmp/flag"));
    }

    #[test]
    fn test_env_home_used() {
        let dir = resolve(None, Some("/tmp/env".to_string()));
        assert_eq!(dir, PathBuf::from("/tmp/env"));
    }

    #[test]
    fn test_blank_env_falls_back_to_default() {
        assert_eq!(resolve(None, Some("  ".to_string())), default_settings_dir());
        assert_eq!(resolve(None, None), default_settings_dir());
    }

    #[test]
    fn test_default_dir_name() {
        assert!(default_settings_dir().ends_with(".aws-upload"));
    }
}
