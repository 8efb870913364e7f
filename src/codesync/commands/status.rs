use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SyncError};
use crate::extensions::{self, ExtensionHost};
use crate::machine::MachineInfo;
use crate::paths::{LocalFiles, UserFile};
use crate::resolve::resolve;
use crate::session::{Lookup, SyncSession};
use crate::snapshot::ConfigSnapshot;
use crate::store::RemoteStore;

/// Reports how the local machine differs from the remote snapshot. Read-only.
pub fn run<S: RemoteStore, H: ExtensionHost>(
    store: &mut S,
    host: &H,
    local: &LocalFiles,
    machine: &MachineInfo,
    filename: &str,
    sync_extensions: bool,
) -> Result<CmdResult> {
    let session = SyncSession::open(filename, store)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!(
        "Machine: {} ({})",
        machine.hostname, machine.os
    )));

    let remote = match session.lookup()? {
        Lookup::Found(file) => file,
        Lookup::Missing => {
            result.add_message(CmdMessage::warning(format!(
                "No remote file named {}. Run upload first.",
                session.filename()
            )));
            return Ok(result);
        }
        Lookup::Ambiguous(count) => {
            return Err(SyncError::LookupAmbiguous {
                name: session.filename().to_string(),
                count,
            });
        }
    };

    result.add_message(CmdMessage::info(format!(
        "Remote {} last modified {}",
        remote.name,
        remote.modified.format("%Y-%m-%d %H:%M UTC")
    )));
    let snapshot = ConfigSnapshot::from_persisted(&session.read(&remote)?)?;

    for file in UserFile::ALL {
        let slot = snapshot.slot(file);
        let expected = resolve(&slot.join("\n"), machine).text;
        let state = match local.read(file)? {
            None if slot.is_empty() => "absent",
            Some(_) if slot.is_empty() => "not in remote snapshot",
            None => "missing locally",
            Some(current) if current == expected => "up to date",
            Some(_) => "differs from remote",
        };
        result.add_message(CmdMessage::info(format!("{}: {}", file, state)));
    }

    if sync_extensions {
        let installed = host.installed()?;
        let diff = extensions::diff(&installed, &snapshot.extensions);
        if diff.is_empty() {
            result.add_message(CmdMessage::info("Extensions: up to date"));
        } else {
            if !diff.to_install.is_empty() {
                result.add_message(CmdMessage::info(format!(
                    "Extensions to install: {}",
                    diff.to_install.join(" ")
                )));
            }
            if !diff.to_remove.is_empty() {
                result.add_message(CmdMessage::info(format!(
                    "Extensions to remove: {}",
                    diff.to_remove.join(" ")
                )));
            }
        }
        result.extensions = diff;
    }

    result.remote = Some(remote);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{RecordingHost, TestEnv};

    fn contents(result: &CmdResult) -> Vec<String> {
        result.messages.iter().map(|m| m.content.clone()).collect()
    }

    #[test]
    fn missing_remote_is_a_warning_not_an_error() {
        let mut env = TestEnv::new();
        let host = RecordingHost::default();
        let result = run(&mut env.store, &host, &env.local, &env.machine, "sync.json", true).unwrap();
        assert!(result.remote.is_none());
        assert!(contents(&result)
            .iter()
            .any(|m| m.contains("No remote file named sync.json")));
    }

    #[test]
    fn reports_file_states_and_pending_extensions() {
        let mut env = TestEnv::new();
        let snapshot = ConfigSnapshot {
            settings: vec!["{}".into()],
            keybindings: vec!["[]".into()],
            extensions: vec!["B".into()],
            ..Default::default()
        };
        env.store
            .create("sync.json", &snapshot.to_persisted().unwrap())
            .unwrap();
        env.local.write(UserFile::Settings, "{}").unwrap();
        env.local.write(UserFile::Locale, "{}").unwrap();
        let host = RecordingHost::with_installed(&["A"]);

        let result = run(&mut env.store, &host, &env.local, &env.machine, "sync.json", true).unwrap();

        let msgs = contents(&result);
        assert!(msgs.contains(&"settings.json: up to date".to_string()));
        assert!(msgs.contains(&"keybindings.json: missing locally".to_string()));
        assert!(msgs.contains(&"locale.json: not in remote snapshot".to_string()));
        assert!(msgs.contains(&"Extensions to install: B".to_string()));
        assert!(msgs.contains(&"Extensions to remove: A".to_string()));
        assert!(host.calls().is_empty());
    }

    #[test]
    fn ambiguous_remote_aborts() {
        let mut env = TestEnv::new();
        env.store.create("sync.json", "{}").unwrap();
        env.store.create("sync.json", "{}").unwrap();
        let host = RecordingHost::default();

        let err = run(&mut env.store, &host, &env.local, &env.machine, "sync.json", true).unwrap_err();

        assert!(matches!(err, SyncError::LookupAmbiguous { count: 2, ref name } if name == "sync.json"));
        assert!(host.calls().is_empty());
    }

    #[test]
    fn absent_everywhere_is_reported_as_absent() {
        let mut env = TestEnv::new();
        env.store
            .create("sync.json", &ConfigSnapshot::default().to_persisted().unwrap())
            .unwrap();
        let host = RecordingHost::default();

        let result = run(&mut env.store, &host, &env.local, &env.machine, "sync.json", false).unwrap();

        assert!(contents(&result).contains(&"locale.json: absent".to_string()));
        assert!(!result.has_errors());
    }
}
