// ── Consumer-facing inventory facade ──
//
// The operations every front end shares: cached full fetch, direct
// per-domain fetch, and the read-only views computed over the cache.

use std::sync::Arc;

use tracing::info;

use crate::cache::{CacheEntry, InventoryCache};
use crate::collector::Collector;
use crate::config::CollectorConfig;
use crate::error::CoreError;
use crate::model::{ControllerCount, DeviceRecord, Domain, Summary};
use crate::query;
use crate::registry::SiteRegistry;

/// Entry point for consumers.
///
/// Full-aggregate reads go through the cache; `fetch_domain` always hits
/// the controllers directly.
pub struct Inventory {
    cache: InventoryCache<Collector>,
}

impl Inventory {
    pub fn new(registry: SiteRegistry, config: CollectorConfig) -> Self {
        let ttl = config.cache_ttl;
        Self {
            cache: InventoryCache::new(Collector::new(registry, config), ttl),
        }
    }

    pub fn collector(&self) -> &Collector {
        self.cache.source()
    }

    /// The full aggregate, from cache unless stale or `force` is set.
    pub async fn fetch_all(&self, force: bool) -> Arc<CacheEntry> {
        self.cache.get(force).await
    }

    /// Resolve `keyword` to a domain and fetch it, bypassing the cache.
    pub async fn fetch_domain(&self, keyword: &str) -> Result<(Domain, Vec<DeviceRecord>), CoreError> {
        let domain = query::resolve_domain(keyword)?;
        info!(%domain, keyword, "domain fetch");
        let records = self.collector().fetch_domain(domain).await;
        Ok((domain, records))
    }

    /// Device records matching `query` in the cached aggregate.
    pub async fn search(&self, query: &str) -> Vec<DeviceRecord> {
        let entry = self.cache.get(false).await;
        query::search(&entry.records, query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Error records and devices with an unhealthy status.
    pub async fn unhealthy(&self) -> Vec<DeviceRecord> {
        let entry = self.cache.get(false).await;
        query::unhealthy(&entry.records)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn summary(&self) -> Summary {
        let entry = self.cache.get(false).await;
        query::summarize(&entry.records)
    }

    pub async fn controller_breakdown(&self) -> Vec<ControllerCount> {
        let entry = self.cache.get(false).await;
        query::controller_breakdown(&entry.records)
    }

    /// Drop the cached aggregate.
    pub fn invalidate(&self) {
        self.cache.invalidate();
    }
}
