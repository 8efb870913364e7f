//! # Machine Identity
//!
//! Region predicates are evaluated against the machine running the download:
//! its hostname and its normalized OS name (`macos`, `linux`, `windows`).
//!
//! Detection happens once per command. An unrecognized platform is fatal for
//! the whole command, since neither the editor paths nor `os:` predicates can
//! be resolved without it.

use crate::error::{Result, SyncError};
use std::env;
use std::fmt;
use std::process::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsName {
    MacOs,
    Linux,
    Windows,
}

impl OsName {
    /// Maps a platform identifier as reported by `std::env::consts::OS`.
    pub fn from_platform(platform: &str) -> Result<Self> {
        match platform {
            "macos" => Ok(OsName::MacOs),
            "linux" => Ok(OsName::Linux),
            "windows" => Ok(OsName::Windows),
            other => Err(SyncError::UnknownPlatform(other.to_string())),
        }
    }

    pub fn current() -> Result<Self> {
        Self::from_platform(env::consts::OS)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OsName::MacOs => "macos",
            OsName::Linux => "linux",
            OsName::Windows => "windows",
        }
    }
}

impl fmt::Display for OsName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineInfo {
    pub hostname: String,
    pub os: OsName,
}

impl MachineInfo {
    pub fn new(hostname: impl Into<String>, os: OsName) -> Self {
        Self {
            hostname: hostname.into(),
            os,
        }
    }

    /// Detects the current machine. An explicit hostname (config key or
    /// `CODESYNC_HOSTNAME`) wins over the system hostname. Shell variables
    /// such as `HOSTNAME` are not consulted.
    pub fn detect(hostname_override: Option<&str>) -> Result<Self> {
        let os = OsName::current()?;
        let hostname = match hostname_override.filter(|h| !h.is_empty()) {
            Some(h) => h.to_string(),
            None => detect_hostname()?,
        };
        Ok(Self { hostname, os })
    }
}

fn detect_hostname() -> Result<String> {
    let output = Command::new("hostname")
        .output()
        .map_err(|e| SyncError::Machine(format!("Failed to run 'hostname': {}", e)))?;
    if !output.status.success() {
        return Err(SyncError::Machine(
            "'hostname' exited with non-zero status".to_string(),
        ));
    }

    let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if name.is_empty() {
        return Err(SyncError::Machine("Hostname is empty".to_string()));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_platforms_map_to_normalized_names() {
        assert_eq!(OsName::from_platform("macos").unwrap(), OsName::MacOs);
        assert_eq!(OsName::from_platform("linux").unwrap(), OsName::Linux);
        assert_eq!(OsName::from_platform("windows").unwrap(), OsName::Windows);
        assert_eq!(OsName::MacOs.to_string(), "macos");
    }

    #[test]
    fn unknown_platform_is_an_error() {
        let err = OsName::from_platform("freebsd").unwrap_err();
        assert!(matches!(err, SyncError::UnknownPlatform(ref p) if p == "freebsd"));
        assert_eq!(err.to_string(), "Unknown platform freebsd");
    }

    #[test]
    fn hostname_override_is_used_verbatim() {
        if OsName::current().is_err() {
            return;
        }
        let info = MachineInfo::detect(Some("DESKTOP-FS50R2V")).unwrap();
        assert_eq!(info.hostname, "DESKTOP-FS50R2V");
    }

    #[test]
    fn exported_hostname_variable_is_ignored() {
        if OsName::current().is_err() {
            return;
        }
        std::env::set_var("HOSTNAME", "stale-exported-name");
        let detected = MachineInfo::detect(None);
        std::env::remove_var("HOSTNAME");

        // Hosts without a `hostname` binary fail detection outright.
        if let Ok(info) = detected {
            assert_ne!(info.hostname, "stale-exported-name");
        }
    }
}
