use crate::error::{Result, SyncError};
use crate::extensions::{ExtensionHost, HostOutput};
use crate::machine::{MachineInfo, OsName};
use crate::paths::LocalFiles;
use crate::store::memory::MemStore;
use std::cell::RefCell;
use std::path::PathBuf;
use tempfile::TempDir;

/// Extension host that tracks an installed list in memory and records every
/// call made to it.
#[derive(Default)]
pub struct RecordingHost {
    installed: RefCell<Vec<String>>,
    calls: RefCell<Vec<String>>,
    failing: Vec<String>,
    unavailable: bool,
}

impl RecordingHost {
    pub fn with_installed(ids: &[&str]) -> Self {
        Self {
            installed: RefCell::new(ids.iter().map(|s| s.to_string()).collect()),
            ..Default::default()
        }
    }

    /// Install/uninstall of `id` reports a non-zero exit.
    pub fn failing_on(mut self, id: &str) -> Self {
        self.failing.push(id.to_string());
        self
    }

    /// Every call fails as if the editor CLI were missing.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn current(&self) -> Vec<String> {
        self.installed.borrow().clone()
    }

    fn check(&self) -> Result<()> {
        if self.unavailable {
            return Err(SyncError::Host("Failed to launch 'code'".to_string()));
        }
        Ok(())
    }

    fn outcome(&self, id: &str) -> HostOutput {
        let success = !self.failing.iter().any(|f| f == id);
        HostOutput {
            success,
            stdout: String::new(),
            stderr: if success {
                String::new()
            } else {
                format!("Extension '{}' not found.", id)
            },
        }
    }
}

impl ExtensionHost for RecordingHost {
    fn installed(&self) -> Result<Vec<String>> {
        self.check()?;
        Ok(self.current())
    }

    fn install(&self, id: &str) -> Result<HostOutput> {
        self.check()?;
        self.calls.borrow_mut().push(format!("install {}", id));
        let out = self.outcome(id);
        if out.success {
            self.installed.borrow_mut().push(id.to_string());
        }
        Ok(out)
    }

    fn uninstall(&self, id: &str) -> Result<HostOutput> {
        self.check()?;
        self.calls.borrow_mut().push(format!("uninstall {}", id));
        let out = self.outcome(id);
        if out.success {
            self.installed.borrow_mut().retain(|x| x != id);
        }
        Ok(out)
    }
}

pub struct TestEnv {
    // Keeps the directory alive for the duration of the test
    pub _temp_dir: TempDir,
    pub root: PathBuf,
    pub local: LocalFiles,
    pub store: MemStore,
    pub machine: MachineInfo,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let local = LocalFiles::new(root.join("User"));
        Self {
            _temp_dir: temp_dir,
            root,
            local,
            store: MemStore::new(),
            machine: MachineInfo::new("test-host", OsName::Linux),
        }
    }

    pub fn on_machine(mut self, hostname: &str, os: OsName) -> Self {
        self.machine = MachineInfo::new(hostname, os);
        self
    }
}
