use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use server::config::AppConfig;
use server::state::AppState;
use server::store::{QrxStore, SupabaseStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::load().context("Failed to load config")?;

    let store: Option<Arc<dyn QrxStore>> = match config.supabase.validate() {
        Ok(settings) => {
            info!(url = %settings.url, "Data service configured");
            let store = SupabaseStore::new(&settings).context("Failed to build HTTP client")?;
            Some(Arc::new(store) as Arc<dyn QrxStore>)
        }
        Err(missing) => {
            warn!(
                missing = ?missing,
                "Data service not configured; lookups will answer 'Server not configured'"
            );
            None
        }
    };

    let presence = config.presence();
    info!(
        android_url = presence.android_url,
        ios_url = presence.ios_url,
        dev_deep_link_base = presence.dev_deep_link_base,
        fallback_delay_ms = config.links.fallback_delay_ms,
        "Links configured"
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = server::build_router(AppState::new(config, store));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
