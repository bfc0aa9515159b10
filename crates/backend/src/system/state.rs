use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::shared::config::{resolve_static_dir, Config};
use crate::shared::sheets::SheetClient;
use crate::system::auth::provider::{CachedCredentials, CredentialProvider, NoSheet};
use crate::system::sessions::SessionStore;

/// Shared application state passed to handlers via axum `State`
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub credentials: Arc<CachedCredentials>,
    pub sessions: Arc<SessionStore>,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let provider: Arc<dyn CredentialProvider> = if config.sheets.enabled {
            Arc::new(SheetClient::new(&config.sheets)?)
        } else {
            tracing::info!("Credential sheet disabled, using built-in table only");
            Arc::new(NoSheet)
        };
        let static_dir = resolve_static_dir(&config);
        Ok(Self::with_provider(config, provider, static_dir))
    }

    pub fn with_provider(
        config: Config,
        provider: Arc<dyn CredentialProvider>,
        static_dir: PathBuf,
    ) -> Self {
        let credentials =
            CachedCredentials::new(provider, Duration::from_secs(config.sheets.cache_ttl_secs));
        let sessions = SessionStore::new(&config.session);

        Self {
            config: Arc::new(config),
            credentials: Arc::new(credentials),
            sessions: Arc::new(sessions),
            static_dir,
        }
    }
}
