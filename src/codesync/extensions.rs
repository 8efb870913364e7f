//! # Extensions
//!
//! The extension list is synced by id. On download the locally installed
//! set is compared with the uploaded one: missing ids are installed, extra
//! ids are uninstalled.
//!
//! Enumerating and (un)installing extensions goes through the
//! [`ExtensionHost`] capability so commands never spawn processes directly.
//! [`CodeCli`] drives the editor's command line; tests use a recording host.

use crate::error::{Result, SyncError};
use crate::machine::OsName;
use std::process::Command;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionDiff {
    pub to_install: Vec<String>,
    pub to_remove: Vec<String>,
}

impl ExtensionDiff {
    pub fn is_empty(&self) -> bool {
        self.to_install.is_empty() && self.to_remove.is_empty()
    }
}

/// `to_install` keeps the order of `expected`, `to_remove` the order of `installed`.
pub fn diff(installed: &[String], expected: &[String]) -> ExtensionDiff {
    ExtensionDiff {
        to_install: expected
            .iter()
            .filter(|id| !installed.contains(id))
            .cloned()
            .collect(),
        to_remove: installed
            .iter()
            .filter(|id| !expected.contains(id))
            .cloned()
            .collect(),
    }
}

/// Result of one install/uninstall invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

pub trait ExtensionHost {
    /// Ids of installed, non built-in extensions.
    fn installed(&self) -> Result<Vec<String>>;

    fn install(&self, id: &str) -> Result<HostOutput>;

    fn uninstall(&self, id: &str) -> Result<HostOutput>;
}

/// Name of the editor launcher on `os`.
pub fn default_binary(os: OsName) -> &'static str {
    match os {
        OsName::Windows => "code.cmd",
        OsName::MacOs | OsName::Linux => "code",
    }
}

/// Drives the editor command line (`code --install-extension ...`).
#[derive(Debug, Clone)]
pub struct CodeCli {
    binary: String,
}

impl CodeCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn for_os(os: OsName) -> Self {
        Self::new(default_binary(os))
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    fn run(&self, args: &[&str]) -> Result<HostOutput> {
        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .map_err(|e| {
                SyncError::Host(format!("Failed to launch '{}': {}", self.binary, e))
            })?;

        let result = HostOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        debug!(binary = %self.binary, args = ?args, status = ?output.status.code(), "editor cli finished");
        if !result.stdout.is_empty() {
            debug!("==stdout==\n{}", result.stdout);
        }
        if !result.stderr.is_empty() {
            debug!("==stderr==\n{}", result.stderr);
        }
        Ok(result)
    }
}

impl ExtensionHost for CodeCli {
    fn installed(&self) -> Result<Vec<String>> {
        let output = self.run(&["--list-extensions"])?;
        if !output.success {
            return Err(SyncError::Host(format!(
                "'{} --list-extensions' failed: {}",
                self.binary,
                output.stderr.trim()
            )));
        }
        Ok(parse_extension_list(&output.stdout))
    }

    fn install(&self, id: &str) -> Result<HostOutput> {
        self.run(&["--install-extension", id])
    }

    fn uninstall(&self, id: &str) -> Result<HostOutput> {
        self.run(&["--uninstall-extension", id])
    }
}

/// One id per line; blank lines are skipped.
fn parse_extension_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn diff_computes_both_directions() {
        let d = diff(&ids(&["A", "B", "C"]), &ids(&["B", "C", "D"]));
        assert_eq!(d.to_install, vec!["D"]);
        assert_eq!(d.to_remove, vec!["A"]);
        assert!(!d.is_empty());
    }

    #[test]
    fn diff_preserves_source_order() {
        let d = diff(&ids(&["z", "keep", "a"]), &ids(&["y", "keep", "b"]));
        assert_eq!(d.to_install, vec!["y", "b"]);
        assert_eq!(d.to_remove, vec!["z", "a"]);
    }

    #[test]
    fn identical_sets_produce_empty_diff() {
        let d = diff(&ids(&["a", "b"]), &ids(&["b", "a"]));
        assert!(d.is_empty());
    }

    #[test]
    fn windows_uses_cmd_launcher() {
        assert_eq!(default_binary(OsName::Windows), "code.cmd");
        assert_eq!(default_binary(OsName::Linux), "code");
        assert_eq!(CodeCli::for_os(OsName::MacOs).binary(), "code");
    }

    #[test]
    fn extension_list_parsing_skips_blanks() {
        let out = "ms-python.python\n\n  vscodevim.vim  \n";
        assert_eq!(
            parse_extension_list(out),
            vec!["ms-python.python", "vscodevim.vim"]
        );
    }

    #[test]
    fn missing_binary_is_a_host_error() {
        let cli = CodeCli::new("codesync-definitely-not-a-binary");
        assert!(matches!(cli.installed(), Err(SyncError::Host(_))));
    }
}
