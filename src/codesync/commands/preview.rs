use crate::annotate::annotate;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::machine::MachineInfo;
use crate::paths::{LocalFiles, UserFile};
use crate::resolve::resolve;
use crate::session::SyncSession;
use crate::snapshot::ConfigSnapshot;
use crate::store::RemoteStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewMode {
    /// What upload would store for the local file.
    Upload,
    /// What download would write for this machine.
    Download,
}

pub fn upload(local: &LocalFiles, file: UserFile) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let raw = match local.read(file)? {
        Some(raw) => raw,
        None => {
            result.add_message(CmdMessage::warning(format!("{} not found", file)));
            return Ok(result);
        }
    };

    let annotated = annotate(&raw);
    result.report_issues(file, &annotated.issues);
    result.text = Some(annotated.lines.join("\n"));
    Ok(result)
}

pub fn download<S: RemoteStore>(
    store: &mut S,
    machine: &MachineInfo,
    filename: &str,
    file: UserFile,
) -> Result<CmdResult> {
    let session = SyncSession::open(filename, store)?;
    let remote = session.require()?;
    let snapshot = ConfigSnapshot::from_persisted(&session.read(&remote)?)?;

    let mut result = CmdResult::default();
    let resolved = resolve(&snapshot.slot(file).join("\n"), machine);
    result.report_issues(file, &resolved.issues);
    result.text = Some(resolved.text);
    result.remote = Some(remote);
    Ok(result)
}
