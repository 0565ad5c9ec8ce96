use std::time::Duration;

use common::deep_link::DEFAULT_FALLBACK_DELAY;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

/// Connection to the hosted data service. Both values are optional here and
/// checked once by [`SupabaseConfig::validate`].
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    #[serde(default)]
    pub url: Option<String>,
    /// API key sent as `apikey` and bearer token.
    #[serde(default)]
    pub key: Option<String>,
    /// Per-request timeout in seconds. Default: 10.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

/// Validated data-service settings.
#[derive(Clone)]
pub struct SupabaseSettings {
    pub url: String,
    pub key: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for SupabaseSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseSettings")
            .field("url", &self.url)
            .field("key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl SupabaseConfig {
    /// Trimmed, non-empty URL.
    pub fn url(&self) -> Option<&str> {
        present(self.url.as_deref())
    }

    /// Trimmed, non-empty key.
    pub fn key(&self) -> Option<&str> {
        present(self.key.as_deref())
    }

    /// Returns the settings, or the names of the missing values.
    pub fn validate(&self) -> Result<SupabaseSettings, Vec<&'static str>> {
        match (self.url(), self.key()) {
            (Some(url), Some(key)) => Ok(SupabaseSettings {
                url: url.trim_end_matches('/').to_string(),
                key: key.to_string(),
                timeout: Duration::from_secs(self.timeout_secs),
            }),
            (url, key) => {
                let mut missing = Vec::new();
                if url.is_none() {
                    missing.push("supabase.url");
                }
                if key.is_none() {
                    missing.push("supabase.key");
                }
                Err(missing)
            }
        }
    }
}

/// Public links rendered into pages.
#[derive(Debug, Deserialize, Clone)]
pub struct LinksConfig {
    /// Canonical site origin used for copyable links.
    #[serde(default = "default_web_base")]
    pub web_base: String,
    #[serde(default)]
    pub android_url: Option<String>,
    #[serde(default)]
    pub ios_url: Option<String>,
    /// Development-only deep-link base (e.g. an Expo Go URL).
    #[serde(default)]
    pub dev_deep_link_base: Option<String>,
    /// Countdown before an unanswered deep link falls back to `/get-app`.
    #[serde(default = "default_fallback_delay_ms")]
    pub fallback_delay_ms: u64,
}

fn default_web_base() -> String {
    "https://mioseg-qr.com".into()
}

fn default_fallback_delay_ms() -> u64 {
    DEFAULT_FALLBACK_DELAY.as_millis() as u64
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            web_base: default_web_base(),
            android_url: None,
            ios_url: None,
            dev_deep_link_base: None,
            fallback_delay_ms: default_fallback_delay_ms(),
        }
    }
}

impl LinksConfig {
    pub fn android_url(&self) -> Option<&str> {
        present(self.android_url.as_deref())
    }

    pub fn ios_url(&self) -> Option<&str> {
        present(self.ios_url.as_deref())
    }

    pub fn dev_deep_link_base(&self) -> Option<&str> {
        present(self.dev_deep_link_base.as_deref())
    }

    pub fn fallback_delay(&self) -> Duration {
        Duration::from_millis(self.fallback_delay_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub supabase: SupabaseConfig,
    #[serde(default)]
    pub links: LinksConfig,
}

/// Which configuration values are set. Safe to show in diagnostics.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ConfigPresence {
    pub supabase_url: bool,
    pub supabase_key: bool,
    pub android_url: bool,
    pub ios_url: bool,
    pub dev_deep_link_base: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("QRX_CONFIG").unwrap_or_else(|_| "config/config".to_string());
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            // Load from config/config.toml
            .add_source(File::with_name(config_path).required(false))
            // Override from environment (e.g., QRX__SUPABASE__KEY)
            .add_source(
                Environment::with_prefix("QRX")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors.allow_origins")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }

    pub fn presence(&self) -> ConfigPresence {
        ConfigPresence {
            supabase_url: self.supabase.url().is_some(),
            supabase_key: self.supabase.key().is_some(),
            android_url: self.links.android_url().is_some(),
            ios_url: self.links.ios_url().is_some(),
            dev_deep_link_base: self.links.dev_deep_link_base().is_some(),
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
