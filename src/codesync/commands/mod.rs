//! # Command Layer
//!
//! Each sync operation lives in its own submodule as plain functions over the
//! collaborators it needs (remote store, extension host, local files, machine
//! info). Commands never print and never exit; they return a [`CmdResult`]
//! with structured messages and let the UI decide how to render them.
//!
//! ## Failure Model
//!
//! Region problems (`@beginSync` nesting, both markers on one line) are
//! reported as error-level messages while the transform continues. Any
//! `Err` aborts the whole command. Download resolves everything before the
//! first local write, so a failed lookup or a bad snapshot leaves local files
//! untouched.
//!
//! ## Command Modules
//!
//! - [`upload`]: annotate local files and push the snapshot
//! - [`download`]: pull the snapshot, resolve regions, write files, sync extensions
//! - [`status`]: compare local state with the remote snapshot
//! - [`preview`]: show the annotated or resolved form of one file
//! - [`config`]: show and change configuration
//! - [`paths`]: list local and remote locations

use crate::config::SyncConfig;
use crate::extensions::ExtensionDiff;
use crate::markers::RegionIssue;
use crate::paths::UserFile;
use crate::store::RemoteFile;
use serde::Serialize;
use std::path::PathBuf;
use tracing::warn;

pub mod config;
pub mod download;
pub mod paths;
pub mod preview;
pub mod status;
pub mod upload;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub messages: Vec<CmdMessage>,
    /// Local files written by the command.
    pub written: Vec<PathBuf>,
    /// Paths listed by the `paths` command.
    pub paths: Vec<PathBuf>,
    /// Extensions installed/removed (download) or pending (status).
    pub extensions: ExtensionDiff,
    pub remote: Option<RemoteFile>,
    /// Transformed text (preview).
    pub text: Option<String>,
    pub config: Option<SyncConfig>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_config(mut self, config: SyncConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = paths;
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }

    /// Region problems are reported but never abort the transform.
    pub(crate) fn report_issues(&mut self, file: UserFile, issues: &[RegionIssue]) {
        for issue in issues {
            warn!(file = %file, "{}", issue);
            self.add_message(CmdMessage::error(format!("{}: {}", file, issue)));
        }
    }
}
