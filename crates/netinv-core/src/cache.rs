// ── Aggregate cache ──
//
// Holds the most recent full aggregate for a fixed freshness window.
// Readers load the current entry lock-free through `ArcSwapOption`;
// refreshes serialize on an async mutex so concurrent stale readers
// trigger exactly one upstream fetch.

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwapOption;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::collector::InventorySource;
use crate::model::DeviceRecord;

/// One cached aggregate plus the moment it was produced.
#[derive(Debug)]
pub struct CacheEntry {
    pub records: Vec<DeviceRecord>,
    /// Wall-clock fetch time, for display.
    pub fetched_at: DateTime<Utc>,
    stored_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn new(records: Vec<DeviceRecord>, ttl: Duration) -> Self {
        Self {
            records,
            fetched_at: Utc::now(),
            stored_at: Instant::now(),
            ttl,
        }
    }

    /// Fresh while strictly younger than the TTL.
    pub fn is_fresh(&self) -> bool {
        self.stored_at.elapsed() < self.ttl
    }

    pub fn age(&self) -> Duration {
        self.stored_at.elapsed()
    }
}

/// Time-bounded, single-flight cache in front of an [`InventorySource`].
pub struct InventoryCache<S> {
    source: S,
    ttl: Duration,
    entry: ArcSwapOption<CacheEntry>,
    refresh: Mutex<()>,
}

impl<S: InventorySource> InventoryCache<S> {
    pub fn new(source: S, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            entry: ArcSwapOption::empty(),
            refresh: Mutex::new(()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Current aggregate, refreshing if absent, stale, or `force` is set.
    ///
    /// A caller that waited behind an in-flight refresh reuses the entry
    /// it produced instead of fetching again.
    pub async fn get(&self, force: bool) -> Arc<CacheEntry> {
        let observed = self.entry.load_full();
        if !force {
            if let Some(entry) = observed.as_ref().filter(|e| e.is_fresh()) {
                debug!(age_ms = entry.age().as_millis(), "cache hit");
                return Arc::clone(entry);
            }
        }

        let _guard = self.refresh.lock().await;

        // Someone else refreshed while we waited for the lock.
        let current = self.entry.load_full();
        if let Some(entry) = current.as_ref() {
            let replaced = match &observed {
                Some(old) => !Arc::ptr_eq(old, entry),
                None => true,
            };
            if replaced && (force || entry.is_fresh()) {
                debug!("reusing entry from concurrent refresh");
                return Arc::clone(entry);
            }
        }

        debug!(force, "cache refresh");
        let records = self.source.fetch_all().await;
        let entry = Arc::new(CacheEntry::new(records, self.ttl));
        self.entry.store(Some(Arc::clone(&entry)));
        entry
    }

    /// The current entry without triggering a fetch, fresh or not.
    pub fn peek(&self) -> Option<Arc<CacheEntry>> {
        self.entry.load_full()
    }

    /// Drop the current entry so the next `get` refetches.
    pub fn invalidate(&self) {
        self.entry.store(None);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::model::Domain;

    struct Counting {
        calls: AtomicUsize,
        delay: Duration,
    }

    impl Counting {
        fn new(delay: Duration) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                delay,
            }
        }
    }

    impl InventorySource for Counting {
        async fn fetch_all(&self) -> Vec<DeviceRecord> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            tokio::time::sleep(self.delay).await;
            vec![DeviceRecord::site_error(
                Domain::FabricController,
                "Site-A",
                format!("call {n}"),
            )]
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fresh_entry_is_served_without_fetch() {
        let cache = InventoryCache::new(Counting::new(Duration::ZERO), Duration::from_secs(300));
        cache.get(false).await;
        tokio::time::advance(Duration::from_secs(299)).await;
        cache.get(false).await;
        assert_eq!(cache.source().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn entry_at_ttl_is_stale() {
        let cache = InventoryCache::new(Counting::new(Duration::ZERO), Duration::from_secs(300));
        cache.get(false).await;
        tokio::time::advance(Duration::from_secs(300)).await;
        cache.get(false).await;
        assert_eq!(cache.source().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn force_bypasses_fresh_entry() {
        let cache = InventoryCache::new(Counting::new(Duration::ZERO), Duration::from_secs(300));
        cache.get(false).await;
        cache.get(true).await;
        assert_eq!(cache.source().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_stale_readers_share_one_fetch() {
        let cache = Arc::new(InventoryCache::new(
            Counting::new(Duration::from_secs(2)),
            Duration::from_secs(300),
        ));

        let readers: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                tokio::spawn(async move { cache.get(false).await })
            })
            .collect();

        let mut entries = Vec::new();
        for reader in readers {
            entries.push(reader.await.expect("reader task"));
        }

        assert_eq!(cache.source().calls.load(Ordering::SeqCst), 1);
        assert!(entries.iter().all(|e| Arc::ptr_eq(e, &entries[0])));
    }

    #[tokio::test(start_paused = true)]
    async fn invalidate_forces_refetch() {
        let cache = InventoryCache::new(Counting::new(Duration::ZERO), Duration::from_secs(300));
        cache.get(false).await;
        cache.invalidate();
        assert!(cache.peek().is_none());
        cache.get(false).await;
        assert_eq!(cache.source().calls.load(Ordering::SeqCst), 2);
    }
}
