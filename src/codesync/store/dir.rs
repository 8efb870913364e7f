use super::{RemoteFile, RemoteStore};
use crate::error::{Result, SyncError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const INDEX_FILE: &str = "index.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IndexEntry {
    name: String,
    modified: DateTime<Utc>,
}

/// Remote store backed by a plain directory.
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn blob_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("blob-{}.json", id))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(SyncError::Io)?;
        }
        Ok(())
    }

    fn load_index(&self) -> Result<BTreeMap<String, IndexEntry>> {
        let index_file = self.root.join(INDEX_FILE);
        if !index_file.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(index_file).map_err(SyncError::Io)?;
        let index = serde_json::from_str(&content).map_err(SyncError::Serialization)?;
        Ok(index)
    }

    fn save_index(&self, index: &BTreeMap<String, IndexEntry>) -> Result<()> {
        let content = serde_json::to_string_pretty(index).map_err(SyncError::Serialization)?;
        self.write_atomic(&self.root.join(INDEX_FILE), &content)
    }

    fn write_atomic(&self, target: &Path, content: &str) -> Result<()> {
        self.ensure_dir()?;
        let tmp_path = self.root.join(format!(".tmp-{}", Uuid::new_v4()));
        fs::write(&tmp_path, content).map_err(SyncError::Io)?;
        fs::rename(&tmp_path, target).map_err(SyncError::Io)?;
        Ok(())
    }
}

impl RemoteStore for DirStore {
    fn find_by_name(&self, name: &str) -> Result<Vec<RemoteFile>> {
        let index = self.load_index()?;
        Ok(index
            .into_iter()
            .filter(|(_, entry)| entry.name == name)
            .map(|(id, entry)| RemoteFile {
                id,
                name: entry.name,
                modified: entry.modified,
            })
            .collect())
    }

    fn create(&mut self, name: &str, content: &str) -> Result<RemoteFile> {
        let id = Uuid::new_v4().to_string();
        let modified = Utc::now();

        // Content first, so the index never points at a missing blob.
        self.write_atomic(&self.blob_path(&id), content)?;

        let mut index = self.load_index()?;
        index.insert(
            id.clone(),
            IndexEntry {
                name: name.to_string(),
                modified,
            },
        );
        self.save_index(&index)?;

        Ok(RemoteFile {
            id,
            name: name.to_string(),
            modified,
        })
    }

    fn update(&mut self, id: &str, content: &str) -> Result<()> {
        let mut index = self.load_index()?;
        let entry = index
            .get_mut(id)
            .ok_or_else(|| SyncError::Store(format!("No remote file with id {}", id)))?;
        entry.modified = Utc::now();

        self.write_atomic(&self.blob_path(id), content)?;
        self.save_index(&index)
    }

    fn get(&self, id: &str) -> Result<String> {
        let path = self.blob_path(id);
        if !path.exists() {
            return Err(SyncError::Store(format!("No remote file with id {}", id)));
        }
        fs::read_to_string(path).map_err(SyncError::Io)
    }
}
