use async_trait::async_trait;
use common::{Entry, Media};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::{QrxStore, StoreError};
use crate::config::SupabaseSettings;

const ENTRIES_TABLE: &str = "qr_x_entries";
const MEDIA_TABLE: &str = "qr_x_media";
const ENTRY_COLUMNS: &str =
    "id,owner_user_id,title,description,news,location_name,location_lat,location_lng,logo_url";
const MEDIA_COLUMNS: &str = "id,qrx_id,type,url,filename,bytes";

/// Lookups against the PostgREST interface of a Supabase project.
#[derive(Clone)]
pub struct SupabaseStore {
    http: Client,
    base_url: String,
    key: String,
}

impl SupabaseStore {
    pub fn new(settings: &SupabaseSettings) -> Result<Self, StoreError> {
        let http = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self {
            http,
            base_url: settings.url.clone(),
            key: settings.key.clone(),
        })
    }

    fn table_url(&self, table: &str, filter_column: &str, value: &str, columns: &str) -> String {
        format!(
            "{}/rest/v1/{table}?{filter_column}=eq.{}&select={columns}",
            self.base_url,
            urlencoding::encode(value)
        )
    }

    async fn fetch_rows<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, StoreError> {
        debug!(url, "Querying data service");
        let resp = self
            .http
            .get(url)
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .header("Accept", "application/json")
            .send()
            .await?;
        let text = check_response(resp).await?.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

async fn check_response(resp: Response) -> Result<Response, StoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(StoreError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl QrxStore for SupabaseStore {
    #[instrument(skip(self))]
    async fn find_entry(&self, qrx_id: &str) -> Result<Option<Entry>, StoreError> {
        let url = format!(
            "{}&limit=1",
            self.table_url(ENTRIES_TABLE, "id", qrx_id, ENTRY_COLUMNS)
        );
        let rows: Vec<Entry> = self.fetch_rows(&url).await?;
        Ok(rows.into_iter().next())
    }

    #[instrument(skip(self))]
    async fn list_media(&self, qrx_id: &str) -> Result<Vec<Media>, StoreError> {
        let url = self.table_url(MEDIA_TABLE, "qrx_id", qrx_id, MEDIA_COLUMNS);
        self.fetch_rows(&url).await
    }
}
