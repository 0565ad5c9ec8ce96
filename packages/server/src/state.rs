use std::sync::Arc;

use crate::config::{AppConfig, ConfigPresence};
use crate::error::AppError;
use crate::store::QrxStore;

#[derive(Clone)]
pub struct AppState {
    /// `None` when the data service is not configured.
    pub store: Option<Arc<dyn QrxStore>>,
    pub config: Arc<AppConfig>,
    /// Captured once at startup for diagnostics.
    pub presence: ConfigPresence,
}

impl AppState {
    pub fn new(config: AppConfig, store: Option<Arc<dyn QrxStore>>) -> Self {
        let presence = config.presence();
        Self {
            store,
            config: Arc::new(config),
            presence,
        }
    }

    pub fn store(&self) -> Result<&dyn QrxStore, AppError> {
        self.store.as_deref().ok_or(AppError::NotConfigured)
    }
}
