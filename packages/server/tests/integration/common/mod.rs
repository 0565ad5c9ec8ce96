use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use ::common::{Entry, Media, NewsItem};
use server::config::{AppConfig, CorsConfig, LinksConfig, ServerConfig, SupabaseConfig};
use server::state::AppState;
use server::store::{MemoryStore, QrxStore, StoreError};

pub mod routes {
    pub const HOME: &str = "/";
    pub const GET_APP: &str = "/get-app";
    pub const OPENAPI: &str = "/api-docs/openapi.json";

    pub fn lookup(id: &str) -> String {
        format!("/api/qrx?id={id}")
    }

    pub fn page(raw_id: &str) -> String {
        format!("/qrx/{raw_id}")
    }
}

pub const MOBILE_UA: &str =
    "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 Mobile Safari/537.36";

/// A running test server.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    pub cache_control: Option<String>,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestResponse {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let cache_control = res
            .headers()
            .get(reqwest::header::CACHE_CONTROL)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = res.text().await.expect("Failed to read response body");
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self {
            status,
            cache_control,
            text,
            body,
        }
    }
}

pub fn test_config(links: LinksConfig) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors: CorsConfig {
                allow_origins: vec![],
                max_age: 3600,
            },
        },
        supabase: SupabaseConfig {
            url: Some("http://127.0.0.1:1".to_string()),
            key: Some("test-key".to_string()),
            timeout_secs: 5,
        },
        links,
    }
}

impl TestApp {
    /// Server backed by `store`.
    pub async fn spawn(store: impl QrxStore + 'static) -> Self {
        Self::spawn_with(Some(Arc::new(store)), LinksConfig::default()).await
    }

    /// Server with no data service configured.
    pub async fn spawn_unconfigured() -> Self {
        Self::spawn_with(None, LinksConfig::default()).await
    }

    pub async fn spawn_with(store: Option<Arc<dyn QrxStore>>, links: LinksConfig) -> Self {
        let mut config = test_config(links);
        if store.is_none() {
            config.supabase = SupabaseConfig::default();
        }

        let app = server::build_router(AppState::new(config, store));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn get_with_user_agent(&self, path: &str, user_agent: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .header(reqwest::header::USER_AGENT, user_agent)
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }
}

pub fn entry(id: &str, title: &str) -> Entry {
    Entry {
        id: id.into(),
        owner_user_id: Some("user-1".into()),
        title: title.into(),
        description: Some(format!("Beschreibung von {title}")),
        news: vec![NewsItem {
            text: "Eröffnung".into(),
            created_at: "2025-03-01T09:00:00Z".into(),
        }],
        location_name: Some("Marktplatz 1".into()),
        location_lat: Some(48.137),
        location_lng: Some(11.575),
        logo_url: None,
    }
}

pub fn media(id: &str, qrx_id: &str, kind: &str, filename: &str) -> Media {
    Media {
        id: id.into(),
        qrx_id: qrx_id.into(),
        kind: kind.into(),
        url: format!("https://cdn.example.com/{filename}"),
        filename: filename.into(),
        bytes: Some(1024),
    }
}

/// One entry `abc123` with an image and a file, plus a second entry
/// `def456` without media.
pub fn seeded_store() -> MemoryStore {
    MemoryStore::new()
        .with_entry(entry("abc123", "Hofladen Sonnenschein"))
        .with_entry(entry("def456", "Bäckerei Korn"))
        .with_media(media("m1", "abc123", "image", "front.jpg"))
        .with_media(media("m2", "abc123", "file", "preise.pdf"))
}

/// Wraps a store and fails the chosen lookups.
pub struct FailingStore {
    pub inner: MemoryStore,
    pub fail_entry: bool,
    pub fail_media: bool,
}

impl FailingStore {
    pub fn media_down(inner: MemoryStore) -> Self {
        Self {
            inner,
            fail_entry: false,
            fail_media: true,
        }
    }

    pub fn entries_down(inner: MemoryStore) -> Self {
        Self {
            inner,
            fail_entry: true,
            fail_media: false,
        }
    }
}

fn unavailable() -> StoreError {
    StoreError::Status {
        status: 503,
        body: "upstream unavailable".into(),
    }
}

#[async_trait]
impl QrxStore for FailingStore {
    async fn find_entry(&self, qrx_id: &str) -> Result<Option<Entry>, StoreError> {
        if self.fail_entry {
            return Err(unavailable());
        }
        self.inner.find_entry(qrx_id).await
    }

    async fn list_media(&self, qrx_id: &str) -> Result<Vec<Media>, StoreError> {
        if self.fail_media {
            return Err(unavailable());
        }
        self.inner.list_media(qrx_id).await
    }
}

/// Store whose lookups panic.
pub struct PanicStore;

#[async_trait]
impl QrxStore for PanicStore {
    async fn find_entry(&self, _qrx_id: &str) -> Result<Option<Entry>, StoreError> {
        panic!("store exploded");
    }

    async fn list_media(&self, _qrx_id: &str) -> Result<Vec<Media>, StoreError> {
        panic!("store exploded");
    }
}
