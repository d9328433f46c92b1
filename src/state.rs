use std::sync::Arc;

use crate::backend::{BackendClient, HttpBackend};
use crate::config::AppConfig;
use crate::session::SessionStore;

/// Everything a command needs, wired once at startup and passed down
/// explicitly instead of being re-read from the environment mid-flow.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub backend: Arc<dyn BackendClient>,
    pub store: SessionStore,
}

impl AppState {
    pub fn init(config: AppConfig) -> anyhow::Result<Self> {
        let store = SessionStore::open(&config.data_dir);
        let config = Arc::new(config);
        let backend = Arc::new(HttpBackend::new(&config)?) as Arc<dyn BackendClient>;
        Ok(Self {
            config,
            backend,
            store,
        })
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        backend: Arc<dyn BackendClient>,
        store: SessionStore,
    ) -> Self {
        Self {
            config,
            backend,
            store,
        }
    }
}
