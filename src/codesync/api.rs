//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every codesync operation, whatever the UI.
//!
//! It owns the collaborators a command run needs (remote store, extension
//! host, local files, machine identity, configuration) and passes them to the
//! matching command function. It holds no sync logic itself.
//!
//! `config` and `paths` need no remote access and are called by the CLI
//! directly on the command layer.
//!
//! ## Generic Over Collaborators
//!
//! `SyncApi<S: RemoteStore, H: ExtensionHost>`:
//! - Production: `SyncApi<DirStore, CodeCli>`
//! - Testing: `SyncApi<MemStore, RecordingHost>`

use crate::commands::{self, preview::PreviewMode, CmdResult};
use crate::config::SyncConfig;
use crate::error::Result;
use crate::extensions::ExtensionHost;
use crate::machine::MachineInfo;
use crate::paths::{LocalFiles, UserFile};
use crate::store::RemoteStore;

pub struct SyncApi<S: RemoteStore, H: ExtensionHost> {
    store: S,
    host: H,
    local: LocalFiles,
    machine: MachineInfo,
    config: SyncConfig,
}

impl<S: RemoteStore, H: ExtensionHost> SyncApi<S, H> {
    pub fn new(
        store: S,
        host: H,
        local: LocalFiles,
        machine: MachineInfo,
        config: SyncConfig,
    ) -> Self {
        Self {
            store,
            host,
            local,
            machine,
            config,
        }
    }

    pub fn machine(&self) -> &MachineInfo {
        &self.machine
    }

    pub fn upload(&mut self) -> Result<CmdResult> {
        commands::upload::run(
            &mut self.store,
            &self.host,
            &self.local,
            &self.config.filename,
            self.config.sync_extensions,
        )
    }

    pub fn download(&mut self) -> Result<CmdResult> {
        commands::download::run(
            &mut self.store,
            &self.host,
            &self.local,
            &self.machine,
            &self.config.filename,
            self.config.sync_extensions,
        )
    }

    pub fn status(&mut self) -> Result<CmdResult> {
        commands::status::run(
            &mut self.store,
            &self.host,
            &self.local,
            &self.machine,
            &self.config.filename,
            self.config.sync_extensions,
        )
    }

    pub fn preview(&mut self, file: UserFile, mode: PreviewMode) -> Result<CmdResult> {
        match mode {
            PreviewMode::Upload => commands::preview::upload(&self.local, file),
            PreviewMode::Download => commands::preview::download(
                &mut self.store,
                &self.machine,
                &self.config.filename,
                file,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::OsName;
    use crate::store::memory::MemStore;
    use crate::test_utils::RecordingHost;
    use tempfile::TempDir;

    fn api(tmp: &TempDir, host: RecordingHost) -> SyncApi<MemStore, RecordingHost> {
        let config = SyncConfig {
            filename: "sync.json".into(),
            ..Default::default()
        };
        SyncApi::new(
            MemStore::new(),
            host,
            LocalFiles::new(tmp.path().join("User")),
            MachineInfo::new("box", OsName::Linux),
            config,
        )
    }

    #[test]
    fn upload_then_download_dispatches_to_commands() {
        let tmp = TempDir::new().unwrap();
        let mut api = api(&tmp, RecordingHost::with_installed(&["a.b"]));
        api.local.write(UserFile::Settings, "{}").unwrap();

        let up = api.upload().unwrap();
        assert!(up.remote.is_some());

        let down = api.download().unwrap();
        assert_eq!(down.written, vec![tmp.path().join("User").join("settings.json")]);
        assert!(down.extensions.is_empty());
    }

    #[test]
    fn status_reads_without_writing() {
        let tmp = TempDir::new().unwrap();
        let mut api = api(&tmp, RecordingHost::with_installed(&["x.y"]));
        api.upload().unwrap();

        let status = api.status().unwrap();
        assert!(status.remote.is_some());
        assert!(status.extensions.is_empty());
        assert!(!tmp.path().join("User").exists());
    }

    #[test]
    fn preview_modes() {
        let tmp = TempDir::new().unwrap();
        let mut api = api(&tmp, RecordingHost::default());
        api.local
            .write(UserFile::Settings, "// @beginSync\nx\n// @endSync")
            .unwrap();
        let up = api.preview(UserFile::Settings, PreviewMode::Upload).unwrap();
        assert_eq!(up.text.as_deref(), Some("// @beginSync\n//x\n// @endSync"));

        api.upload().unwrap();
        let down = api.preview(UserFile::Settings, PreviewMode::Download).unwrap();
        assert_eq!(down.text.as_deref(), Some("// @beginSync\nx\n// @endSync"));
    }
}
