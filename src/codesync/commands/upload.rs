use crate::annotate::annotate;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::extensions::ExtensionHost;
use crate::paths::{LocalFiles, UserFile};
use crate::session::{Lookup, SyncSession};
use crate::snapshot::ConfigSnapshot;
use crate::store::RemoteStore;
use tracing::{debug, info, warn};

/// Annotates the local files and writes the snapshot to the remote blob.
///
/// With extension sync disabled, the extension list already stored remotely
/// is carried over so other machines do not see an empty list.
pub fn run<S: RemoteStore, H: ExtensionHost>(
    store: &mut S,
    host: &H,
    local: &LocalFiles,
    filename: &str,
    sync_extensions: bool,
) -> Result<CmdResult> {
    let mut session = SyncSession::open(filename, store)?;
    let mut result = CmdResult::default();

    let mut read_slot = |file: UserFile| -> Result<Vec<String>> {
        match local.read(file)? {
            Some(raw) => {
                let annotated = annotate(&raw);
                debug!(file = %file, lines = annotated.lines.len(), "annotated");
                result.report_issues(file, &annotated.issues);
                Ok(annotated.lines)
            }
            None => {
                result.add_message(CmdMessage::info(format!(
                    "{} not found, left out of the snapshot",
                    file
                )));
                Ok(Vec::new())
            }
        }
    };

    let settings = read_slot(UserFile::Settings)?;
    let keybindings = read_slot(UserFile::Keybindings)?;
    let locale = read_slot(UserFile::Locale)?;

    let extensions = if sync_extensions {
        host.installed()?
    } else {
        match session.lookup()? {
            Lookup::Found(file) => {
                match ConfigSnapshot::from_persisted(&session.read(&file)?) {
                    Ok(existing) => existing.extensions,
                    Err(e) => {
                        warn!(name = %file.name, error = %e, "remote snapshot unreadable");
                        result.add_message(CmdMessage::warning(format!(
                            "Remote {} is unreadable ({}), uploading an empty extension list",
                            file.name, e
                        )));
                        Vec::new()
                    }
                }
            }
            _ => Vec::new(),
        }
    };

    let snapshot = ConfigSnapshot {
        settings,
        keybindings,
        locale,
        extensions,
    };

    let body = snapshot.to_persisted()?;
    let remote = session.write(&body)?;
    info!(
        name = %remote.name,
        id = %remote.id,
        extensions = snapshot.extensions.len(),
        "uploaded snapshot"
    );

    result.remote = Some(remote);
    result.add_message(CmdMessage::success("Sync upload success"));
    Ok(result)
}
