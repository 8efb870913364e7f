//! # Local Editor Files
//!
//! The editor keeps its user configuration in a per-platform directory:
//!
//! | OS      | User directory                                   |
//! |---------|--------------------------------------------------|
//! | macOS   | `~/Library/Application Support/Code/User`        |
//! | Linux   | `~/.config/Code/User`                            |
//! | Windows | `%APPDATA%\Code\User`                            |
//!
//! The platform config directory comes from the `directories` crate; a
//! configured `user_dir` replaces the whole path.

use crate::error::{Result, SyncError};
use directories::BaseDirs;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserFile {
    Settings,
    Keybindings,
    Locale,
}

impl UserFile {
    pub const ALL: [UserFile; 3] = [UserFile::Settings, UserFile::Keybindings, UserFile::Locale];

    pub fn file_name(&self) -> &'static str {
        match self {
            UserFile::Settings => "settings.json",
            UserFile::Keybindings => "keybindings.json",
            UserFile::Locale => "locale.json",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "settings" | "settings.json" => Some(UserFile::Settings),
            "keybindings" | "keybindings.json" => Some(UserFile::Keybindings),
            "locale" | "locale.json" => Some(UserFile::Locale),
            _ => None,
        }
    }
}

impl fmt::Display for UserFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Resolves the editor's user directory for the current platform.
pub fn default_user_dir() -> Result<PathBuf> {
    let base = BaseDirs::new()
        .ok_or_else(|| SyncError::Machine("Could not determine home directory".to_string()))?;
    Ok(base.config_dir().join("Code").join("User"))
}

/// Reads and writes the logical user files under one directory.
#[derive(Debug, Clone)]
pub struct LocalFiles {
    user_dir: PathBuf,
}

impl LocalFiles {
    pub fn new(user_dir: PathBuf) -> Self {
        Self { user_dir }
    }

    pub fn user_dir(&self) -> &Path {
        &self.user_dir
    }

    pub fn path(&self, file: UserFile) -> PathBuf {
        self.user_dir.join(file.file_name())
    }

    /// Returns `Ok(None)` when the file does not exist.
    pub fn read(&self, file: UserFile) -> Result<Option<String>> {
        match fs::read_to_string(self.path(file)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SyncError::Io(e)),
        }
    }

    pub fn exists(&self, file: UserFile) -> bool {
        self.path(file).exists()
    }

    pub fn write(&self, file: UserFile, content: &str) -> Result<()> {
        if !self.user_dir.exists() {
            fs::create_dir_all(&self.user_dir).map_err(SyncError::Io)?;
        }

        // Atomic write
        let tmp_path = self
            .user_dir
            .join(format!(".{}-{}.tmp", file.file_name(), Uuid::new_v4()));
        fs::write(&tmp_path, content).map_err(SyncError::Io)?;
        fs::rename(&tmp_path, self.path(file)).map_err(SyncError::Io)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parse_accepts_short_and_file_names() {
        assert_eq!(UserFile::parse("settings"), Some(UserFile::Settings));
        assert_eq!(UserFile::parse("keybindings.json"), Some(UserFile::Keybindings));
        assert_eq!(UserFile::parse("locale"), Some(UserFile::Locale));
        assert_eq!(UserFile::parse("tasks.json"), None);
    }

    #[test]
    fn missing_file_reads_as_none() {
        let tmp = TempDir::new().unwrap();
        let files = LocalFiles::new(tmp.path().to_path_buf());
        assert_eq!(files.read(UserFile::Locale).unwrap(), None);
        assert!(!files.exists(UserFile::Locale));
    }

    #[test]
    fn write_creates_dir_and_leaves_no_tmp_files() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("Code").join("User");
        let files = LocalFiles::new(dir.clone());

        files.write(UserFile::Settings, "{}").unwrap();
        assert_eq!(files.read(UserFile::Settings).unwrap().as_deref(), Some("{}"));

        for entry in fs::read_dir(&dir).unwrap() {
            let name = entry.unwrap().file_name().into_string().unwrap();
            assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
        }
    }

    #[test]
    fn default_user_dir_ends_with_code_user() {
        if let Ok(dir) = default_user_dir() {
            assert!(dir.ends_with("Code/User"));
        }
    }
}
