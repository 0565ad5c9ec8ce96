use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use common::{Entry, Media};

use super::{QrxStore, StoreError};

/// In-process store for local runs and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
    media: RwLock<Vec<Media>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, entry: Entry) -> Self {
        self.insert_entry(entry);
        self
    }

    pub fn with_media(self, media: Media) -> Self {
        self.insert_media(media);
        self
    }

    pub fn insert_entry(&self, entry: Entry) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(entry.id.clone(), entry);
    }

    /// Media rows are kept even when no entry owns them.
    pub fn insert_media(&self, media: Media) {
        let mut rows = self.media.write().unwrap_or_else(|e| e.into_inner());
        rows.push(media);
    }
}

#[async_trait]
impl QrxStore for MemoryStore {
    async fn find_entry(&self, qrx_id: &str) -> Result<Option<Entry>, StoreError> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(qrx_id).cloned())
    }

    async fn list_media(&self, qrx_id: &str) -> Result<Vec<Media>, StoreError> {
        let rows = self.media.read().unwrap_or_else(|e| e.into_inner());
        Ok(rows.iter().filter(|m| m.qrx_id == qrx_id).cloned().collect())
    }
}
