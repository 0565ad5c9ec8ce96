//! Read-only access to entries and their media.

mod memory;
mod supabase;

pub use memory::MemoryStore;
pub use supabase::SupabaseStore;

use async_trait::async_trait;
use common::{Entry, Media};
use thiserror::Error;

/// Errors from the record lookup service.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request to data service failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("data service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response from data service: {0}")]
    Decode(#[from] serde_json::Error),
}

impl StoreError {
    /// Text handed to clients as the gateway error detail.
    pub fn detail(&self) -> String {
        match self {
            StoreError::Status { body, .. } => body.clone(),
            other => other.to_string(),
        }
    }
}

/// Equality lookups by identifier. Absence is `Ok(None)`, never an error.
#[async_trait]
pub trait QrxStore: Send + Sync {
    /// The entry whose `id` equals `qrx_id`.
    async fn find_entry(&self, qrx_id: &str) -> Result<Option<Entry>, StoreError>;

    /// All media rows whose `qrx_id` equals `qrx_id`, in service order.
    async fn list_media(&self, qrx_id: &str) -> Result<Vec<Media>, StoreError>;
}
