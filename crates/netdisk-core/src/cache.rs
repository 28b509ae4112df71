//! Per-path listing cache.
//!
//! Holds the first page of every folder fetched during the session so that
//! going back to a folder renders instantly. There is no expiry: any mutation
//! (upload, delete, create folder) clears everything, since the set of
//! folders whose listing changed is not known locally.

use std::collections::HashMap;

use crate::models::DirectoryListing;
use crate::path::VirtualPath;

#[derive(Debug, Default)]
pub struct ResultCache {
    records: HashMap<VirtualPath, DirectoryListing>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &VirtualPath) -> Option<&DirectoryListing> {
        self.records.get(path)
    }

    /// Store the first page for `path`, replacing any previous record.
    pub fn put(&mut self, path: VirtualPath, listing: DirectoryListing) {
        self.records.insert(path, listing);
    }

    pub fn invalidate_all(&mut self) {
        self.records.clear();
    }

    pub fn contains(&self, path: &VirtualPath) -> bool {
        self.records.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
