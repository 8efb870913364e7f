use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::extensions::{self, ExtensionDiff, ExtensionHost};
use crate::machine::MachineInfo;
use crate::paths::{LocalFiles, UserFile};
use crate::resolve::resolve;
use crate::session::SyncSession;
use crate::snapshot::ConfigSnapshot;
use crate::store::RemoteStore;
use tracing::{debug, info};

/// Pulls the snapshot, resolves regions for `machine`, writes the local
/// files, then installs and removes extensions to match the uploaded list.
pub fn run<S: RemoteStore, H: ExtensionHost>(
    store: &mut S,
    host: &H,
    local: &LocalFiles,
    machine: &MachineInfo,
    filename: &str,
    sync_extensions: bool,
) -> Result<CmdResult> {
    let session = SyncSession::open(filename, store)?;
    let remote = session.require()?;
    let snapshot = ConfigSnapshot::from_persisted(&session.read(&remote)?)?;
    let mut result = CmdResult::default();

    // Resolve everything before touching the disk.
    let mut pending = Vec::new();
    for file in UserFile::ALL {
        let lines = snapshot.slot(file);
        // An empty slot was missing on the uploading machine.
        if lines.is_empty() {
            result.add_message(CmdMessage::info(format!(
                "{} is not in the remote snapshot, skipped",
                file
            )));
            continue;
        }
        let resolved = resolve(&lines.join("\n"), machine);
        debug!(file = %file, host = %machine.hostname, os = %machine.os, "resolved");
        result.report_issues(file, &resolved.issues);
        pending.push((file, resolved.text));
    }

    for (file, text) in pending {
        local.write(file, &text)?;
        result.written.push(local.path(file));
    }

    if sync_extensions {
        let installed = host.installed()?;
        let diff = extensions::diff(&installed, &snapshot.extensions);
        apply_extensions(host, &diff, &mut result)?;
        result.extensions = diff;
    }

    info!(
        name = %remote.name,
        written = result.written.len(),
        installed = result.extensions.to_install.len(),
        removed = result.extensions.to_remove.len(),
        "downloaded snapshot"
    );

    result.remote = Some(remote);
    result.add_message(CmdMessage::success("Sync download success"));
    if !result.extensions.is_empty() {
        result.add_message(CmdMessage::info(reload_message(&result.extensions)));
    }
    Ok(result)
}

fn apply_extensions<H: ExtensionHost>(
    host: &H,
    diff: &ExtensionDiff,
    result: &mut CmdResult,
) -> Result<()> {
    for id in &diff.to_install {
        let out = host.install(id)?;
        if !out.success {
            result.add_message(CmdMessage::warning(format!(
                "Failed to install {}: {}",
                id,
                out.stderr.trim()
            )));
        }
    }
    for id in &diff.to_remove {
        let out = host.uninstall(id)?;
        if !out.success {
            result.add_message(CmdMessage::warning(format!(
                "Failed to uninstall {}: {}",
                id,
                out.stderr.trim()
            )));
        }
    }
    Ok(())
}

fn reload_message(diff: &ExtensionDiff) -> String {
    let mut msg = String::from("Please reload the window.");
    if !diff.to_install.is_empty() {
        msg.push_str(&format!(
            " Installed extensions: {}",
            diff.to_install.join(" ")
        ));
    }
    if !diff.to_remove.is_empty() {
        msg.push_str(&format!(" Removed extensions: {}", diff.to_remove.join(" ")));
    }
    msg
}
