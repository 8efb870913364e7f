//! # Remote Store
//!
//! The snapshot lives remotely as a named blob. The [`RemoteStore`] trait is
//! the narrow surface the sync commands need: look a blob up by name, create
//! it, overwrite it, read it.
//!
//! ## Name Lookups
//!
//! Names are not unique keys. Two machines uploading for the first time at
//! once can both create a blob with the same name, so `find_by_name` returns
//! every match and the caller decides what zero or several matches mean
//! (see [`crate::session`]). Nothing here ever picks one of several matches.
//!
//! ## Implementations
//!
//! - [`dir::DirStore`]: a directory acting as the remote, e.g. a folder kept
//!   in sync by a cloud drive client.
//!   ```text
//!   <remote>/
//!   ├── index.json          # id -> { name, modified }
//!   └── blob-{id}.json      # blob content
//!   ```
//! - [`memory::MemStore`]: in-memory, for tests.

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod dir;
pub mod memory;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFile {
    pub id: String,
    pub name: String,
    pub modified: DateTime<Utc>,
}

pub trait RemoteStore {
    /// All blobs called `name`, in no particular order.
    fn find_by_name(&self, name: &str) -> Result<Vec<RemoteFile>>;

    fn create(&mut self, name: &str, content: &str) -> Result<RemoteFile>;

    /// Replace the content of an existing blob.
    fn update(&mut self, id: &str, content: &str) -> Result<()>;

    fn get(&self, id: &str) -> Result<String>;
}
