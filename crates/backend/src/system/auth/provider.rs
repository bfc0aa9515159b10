use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use contracts::system::credentials::CredentialTable;
use tokio::sync::Mutex;

use crate::shared::sheets::{SheetClient, SheetError};

/// Source of live credential rows
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn load(&self) -> Result<CredentialTable, SheetError>;
}

#[async_trait]
impl CredentialProvider for SheetClient {
    async fn load(&self) -> Result<CredentialTable, SheetError> {
        self.fetch_table().await
    }
}

struct CacheEntry {
    table: CredentialTable,
    fetched_at: Instant,
}

/// Keeps the last successful load for `ttl`.
///
/// A failed refresh is logged and yields an empty table, so the caller
/// continues with the built-in credentials.
pub struct CachedCredentials {
    provider: Arc<dyn CredentialProvider>,
    ttl: Duration,
    entry: Mutex<Option<CacheEntry>>,
}

impl CachedCredentials {
    pub fn new(provider: Arc<dyn CredentialProvider>, ttl: Duration) -> Self {
        Self {
            provider,
            ttl,
            entry: Mutex::new(None),
        }
    }

    pub async fn table(&self) -> CredentialTable {
        let mut entry = self.entry.lock().await;

        if let Some(cached) = entry.as_ref() {
            if cached.fetched_at.elapsed() < self.ttl {
                return cached.table.clone();
            }
        }

        match self.provider.load().await {
            Ok(table) => {
                *entry = Some(CacheEntry {
                    table: table.clone(),
                    fetched_at: Instant::now(),
                });
                table
            }
            Err(e) => {
                tracing::warn!("Credential sheet unavailable, using built-in table: {}", e);
                CredentialTable::default()
            }
        }
    }
}

/// Provider used when `[sheets] enabled = false`
pub struct NoSheet;

#[async_trait]
impl CredentialProvider for NoSheet {
    async fn load(&self) -> Result<CredentialTable, SheetError> {
        Ok(CredentialTable::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::credentials::OutletCredential;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl CredentialProvider for CountingProvider {
        async fn load(&self) -> Result<CredentialTable, SheetError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(SheetError::Status(reqwest::StatusCode::BAD_GATEWAY));
            }
            Ok(CredentialTable {
                outlet: vec![OutletCredential {
                    short_store_name: "SHEET1".into(),
                    store_name: "Sheet Store".into(),
                    am: "AM".into(),
                    password: "pw".into(),
                }],
                hq: vec![],
            })
        }
    }

    #[tokio::test]
    async fn test_cache_reuses_table_within_ttl() {
        let provider = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let cache = CachedCredentials::new(provider.clone(), Duration::from_secs(300));

        assert_eq!(cache.table().await.outlet.len(), 1);
        assert_eq!(cache.table().await.outlet.len(), 1);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_expired_cache_refetches() {
        let provider = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let cache = CachedCredentials::new(provider.clone(), Duration::ZERO);

        cache.table().await;
        cache.table().await;
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_load_yields_empty_table() {
        let provider = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let cache = CachedCredentials::new(provider, Duration::from_secs(300));
        assert!(cache.table().await.is_empty());
    }
}
