use crate::commands::{CmdMessage, CmdResult};
use crate::config::SyncConfig;
use crate::error::Result;
use crate::paths::{LocalFiles, UserFile};

/// Local file paths first, then the remote directory when configured.
pub fn run(local: &LocalFiles, config: &SyncConfig) -> Result<CmdResult> {
    let mut paths: Vec<_> = UserFile::ALL.iter().map(|f| local.path(*f)).collect();
    let mut messages = Vec::new();

    match config.remote_dir() {
        Ok(dir) => paths.push(dir.to_path_buf()),
        Err(_) => messages.push(CmdMessage::warning(
            "remote-dir is not configured (codesync config remote-dir <path>)",
        )),
    }

    let mut result = CmdResult::default().with_paths(paths);
    result.messages = messages;
    Ok(result)
}
