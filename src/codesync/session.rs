//! Per-command remote access context.
//!
//! A [`SyncSession`] pairs the configured blob name with the store. It is
//! built at the start of a command and dropped when the command returns, so
//! nothing about the remote survives between invocations.

use crate::error::{Result, SyncError};
use crate::store::{RemoteFile, RemoteStore};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Missing,
    Found(RemoteFile),
    Ambiguous(usize),
}

pub struct SyncSession<'a, S: RemoteStore> {
    filename: String,
    store: &'a mut S,
}

impl<'a, S: RemoteStore> SyncSession<'a, S> {
    /// Fails with `MissingConfig` when no blob name is configured.
    pub fn open(filename: &str, store: &'a mut S) -> Result<Self> {
        let filename = filename.trim();
        if filename.is_empty() {
            return Err(SyncError::MissingConfig("filename".to_string()));
        }
        Ok(Self {
            filename: filename.to_string(),
            store,
        })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn lookup(&self) -> Result<Lookup> {
        let mut found = self.store.find_by_name(&self.filename)?;
        debug!(name = %self.filename, matches = found.len(), "remote lookup");
        Ok(match found.len() {
            0 => Lookup::Missing,
            1 => Lookup::Found(found.remove(0)),
            n => Lookup::Ambiguous(n),
        })
    }

    /// Exactly one match, or a lookup error.
    pub fn require(&self) -> Result<RemoteFile> {
        match self.lookup()? {
            Lookup::Found(file) => Ok(file),
            Lookup::Missing => Err(SyncError::LookupMissing(self.filename.clone())),
            Lookup::Ambiguous(count) => Err(SyncError::LookupAmbiguous {
                name: self.filename.clone(),
                count,
            }),
        }
    }

    pub fn read(&self, file: &RemoteFile) -> Result<String> {
        self.store.get(&file.id)
    }

    /// Creates the blob when missing, overwrites it when found once.
    pub fn write(&mut self, content: &str) -> Result<RemoteFile> {
        match self.lookup()? {
            Lookup::Missing => self.store.create(&self.filename, content),
            Lookup::Found(file) => {
                self.store.update(&file.id, content)?;
                Ok(file)
            }
            Lookup::Ambiguous(count) => Err(SyncError::LookupAmbiguous {
                name: self.filename.clone(),
                count,
            }),
        }
    }
}
