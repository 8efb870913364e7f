//! # Configuration
//!
//! Stored as `config.json` in the codesync config directory
//! (`directories::ProjectDirs`, or `CODESYNC_CONFIG_DIR` when set). A missing
//! file means defaults.
//!
//! | Key          | Default            | Description                                   |
//! |--------------|--------------------|-----------------------------------------------|
//! | `filename`   | (empty, required)  | Name of the remote blob                       |
//! | `remote-dir` | (none, required)   | Directory backing the remote store            |
//! | `user-dir`   | platform default   | Editor user directory                         |
//! | `editor-bin` | `code`/`code.cmd`  | Editor launcher used for extensions           |
//! | `hostname`   | detected           | Hostname matched against `hostname:` tokens   |
//! | `extensions` | `true`             | Whether download installs/removes extensions  |
//!
//! `CODESYNC_REMOTE_DIR`, `CODESYNC_USER_DIR` and `CODESYNC_HOSTNAME` override
//! the stored values for one invocation.

use crate::error::{Result, SyncError};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

pub const KEYS: [&str; 6] = [
    "filename",
    "remote-dir",
    "user-dir",
    "editor-bin",
    "hostname",
    "extensions",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncConfig {
    /// Remote blob name
    #[serde(default)]
    pub filename: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_bin: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    #[serde(default = "default_true")]
    pub sync_extensions: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            filename: String::new(),
            remote_dir: None,
            user_dir: None,
            editor_bin: None,
            hostname: None,
            sync_extensions: true,
        }
    }
}

impl SyncConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(SyncError::Io)?;
        let config: SyncConfig =
            serde_json::from_str(&content).map_err(SyncError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(SyncError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(SyncError::Serialization)?;
        fs::write(config_path, content).map_err(SyncError::Io)?;
        Ok(())
    }

    /// Apply `CODESYNC_*` environment overrides.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(dir) = env_value("CODESYNC_REMOTE_DIR") {
            self.remote_dir = Some(PathBuf::from(dir));
        }
        if let Some(dir) = env_value("CODESYNC_USER_DIR") {
            self.user_dir = Some(PathBuf::from(dir));
        }
        if let Some(host) = env_value("CODESYNC_HOSTNAME") {
            self.hostname = Some(host);
        }
        self
    }

    pub fn remote_dir(&self) -> Result<&Path> {
        self.remote_dir
            .as_deref()
            .ok_or_else(|| SyncError::MissingConfig("remote-dir".to_string()))
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "filename" => Some(self.filename.clone()),
            "remote-dir" => Some(display_path(self.remote_dir.as_deref())),
            "user-dir" => Some(display_path(self.user_dir.as_deref())),
            "editor-bin" => Some(self.editor_bin.clone().unwrap_or_default()),
            "hostname" => Some(self.hostname.clone().unwrap_or_default()),
            "extensions" => Some(self.sync_extensions.to_string()),
            _ => None,
        }
    }

    /// Sets a key; an empty value clears optional keys.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        let value = value.trim();
        let optional = |v: &str| {
            if v.is_empty() {
                None
            } else {
                Some(v.to_string())
            }
        };

        match key {
            "filename" => self.filename = value.to_string(),
            "remote-dir" => self.remote_dir = optional(value).map(PathBuf::from),
            "user-dir" => self.user_dir = optional(value).map(PathBuf::from),
            "editor-bin" => self.editor_bin = optional(value),
            "hostname" => self.hostname = optional(value),
            "extensions" => {
                self.sync_extensions = match value {
                    "true" | "on" | "yes" => true,
                    "false" | "off" | "no" => false,
                    other => return Err(format!("Invalid boolean for extensions: {}", other)),
                }
            }
            other => return Err(format!("Unknown config key: {}", other)),
        }
        Ok(())
    }
}

fn env_value(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

fn display_path(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = SyncConfig::default();
        assert_eq!(config.filename, "");
        assert!(config.sync_extensions);
        assert!(matches!(
            config.remote_dir(),
            Err(SyncError::MissingConfig(ref k)) if k == "remote-dir"
        ));
    }

    #[test]
    fn test_load_missing_config() {
        let tmp = TempDir::new().unwrap();
        let config = SyncConfig::load(tmp.path().join("nope")).unwrap();
        assert_eq!(config, SyncConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let mut config = SyncConfig::default();
        config.set("filename", "vscode-sync.json").unwrap();
        config.set("remote-dir", "/mnt/drive/sync").unwrap();
        config.set("extensions", "off").unwrap();
        config.save(tmp.path()).unwrap();

        let loaded = SyncConfig::load(tmp.path()).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.remote_dir().unwrap(), Path::new("/mnt/drive/sync"));
        assert!(!loaded.sync_extensions);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), r#"{"filename": "x"}"#).unwrap();
        let loaded = SyncConfig::load(tmp.path()).unwrap();
        assert_eq!(loaded.filename, "x");
        assert!(loaded.sync_extensions);
    }

    #[test]
    fn test_set_empty_clears_optional() {
        let mut config = SyncConfig::default();
        config.set("hostname", "box").unwrap();
        assert_eq!(config.get("hostname").as_deref(), Some("box"));
        config.set("hostname", "").unwrap();
        assert_eq!(config.hostname, None);
    }

    #[test]
    fn test_unknown_key_and_bad_bool() {
        let mut config = SyncConfig::default();
        assert!(config.set("color", "red").is_err());
        assert!(config.set("extensions", "maybe").is_err());
        assert_eq!(config.get("color"), None);
        for key in KEYS {
            assert!(config.get(key).is_some(), "key {}", key);
        }
    }
}
