use super::{RemoteFile, RemoteStore};
use crate::error::{Result, SyncError};
use chrono::Utc;
use std::collections::HashMap;

#[derive(Clone)]
struct Blob {
    file: RemoteFile,
    content: String,
}

/// In-memory remote store for testing.
#[derive(Default)]
pub struct MemStore {
    blobs: HashMap<String, Blob>,
    next_id: usize,
    simulate_write_error: bool,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    /// Number of stored blobs, regardless of name.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    fn check_writable(&self) -> Result<()> {
        if self.simulate_write_error {
            return Err(SyncError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl RemoteStore for MemStore {
    fn find_by_name(&self, name: &str) -> Result<Vec<RemoteFile>> {
        let mut found: Vec<RemoteFile> = self
            .blobs
            .values()
            .filter(|b| b.file.name == name)
            .map(|b| b.file.clone())
            .collect();
        found.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(found)
    }

    fn create(&mut self, name: &str, content: &str) -> Result<RemoteFile> {
        self.check_writable()?;
        self.next_id += 1;
        let file = RemoteFile {
            id: format!("mem-{}", self.next_id),
            name: name.to_string(),
            modified: Utc::now(),
        };
        self.blobs.insert(
            file.id.clone(),
            Blob {
                file: file.clone(),
                content: content.to_string(),
            },
        );
        Ok(file)
    }

    fn update(&mut self, id: &str, content: &str) -> Result<()> {
        self.check_writable()?;
        let blob = self
            .blobs
            .get_mut(id)
            .ok_or_else(|| SyncError::Store(format!("No remote file with id {}", id)))?;
        blob.content = content.to_string();
        blob.file.modified = Utc::now();
        Ok(())
    }

    fn get(&self, id: &str) -> Result<String> {
        self.blobs
            .get(id)
            .map(|b| b.content.clone())
            .ok_or_else(|| SyncError::Store(format!("No remote file with id {}", id)))
    }
}
