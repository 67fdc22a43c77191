// ── Concurrent inventory collector ──
//
// Two levels of fan-out: one task per domain, and within each domain one
// task per configured site. Site failures become error records tagged with
// the site's name; a fault in a domain task itself becomes a single
// `system` record. Neither ever escapes `fetch_all`.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info, warn};

use crate::adapter;
use crate::config::{CollectorConfig, SiteConfig};
use crate::error::CoreError;
use crate::model::{DeviceRecord, Domain};
use crate::query;
use crate::registry::SiteRegistry;

// ── SiteOutcome ──────────────────────────────────────────────────

/// Terminal state of one site fetch task.
#[derive(Debug, Clone)]
pub enum SiteOutcome {
    Succeeded(Vec<DeviceRecord>),
    /// The single error record standing in for the whole site.
    Failed(DeviceRecord),
}

impl SiteOutcome {
    fn from_result(site: &SiteConfig, result: Result<Vec<DeviceRecord>, CoreError>) -> Self {
        match result {
            Ok(records) => {
                debug!(domain = %site.domain, site = %site.name, count = records.len(), "site fetch succeeded");
                Self::Succeeded(records)
            }
            Err(e) => {
                warn!(domain = %site.domain, site = %site.name, error = %e, "site fetch failed");
                Self::Failed(DeviceRecord::site_error(site.domain, site.name.clone(), e.to_string()))
            }
        }
    }

    pub fn into_records(self) -> Vec<DeviceRecord> {
        match self {
            Self::Succeeded(records) => records,
            Self::Failed(record) => vec![record],
        }
    }
}

// ── InventorySource ──────────────────────────────────────────────

/// Anything that can produce a full aggregate on demand.
///
/// The cache is generic over this so it can be driven by a fake in tests.
pub trait InventorySource: Send + Sync {
    fn fetch_all(&self) -> impl Future<Output = Vec<DeviceRecord>> + Send;
}

// ── Collector ────────────────────────────────────────────────────

/// Fans out across domains and sites and merges the results.
///
/// Cheaply cloneable via `Arc<CollectorInner>`.
#[derive(Clone)]
pub struct Collector {
    inner: Arc<CollectorInner>,
}

struct CollectorInner {
    registry: SiteRegistry,
    config: CollectorConfig,
}

impl Collector {
    pub fn new(registry: SiteRegistry, config: CollectorConfig) -> Self {
        Self {
            inner: Arc::new(CollectorInner { registry, config }),
        }
    }

    pub fn registry(&self) -> &SiteRegistry {
        &self.inner.registry
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.inner.config
    }

    /// Fetch every site of every domain concurrently.
    ///
    /// Record order follows task completion and is not stable. Never fails:
    /// the worst case is a vector of error records.
    pub async fn fetch_all(&self) -> Vec<DeviceRecord> {
        let mut domains = JoinSet::new();
        for domain in Domain::all() {
            let collector = self.clone();
            domains.spawn(async move { collector.fetch_domain(domain).await });
        }

        let mut records = Vec::new();
        while let Some(joined) = domains.join_next().await {
            match joined {
                Ok(batch) => records.extend(batch),
                Err(e) => {
                    warn!(error = %e, "domain task aborted");
                    records.push(DeviceRecord::system_error(format!("domain task failed: {e}")));
                }
            }
        }

        info!(
            records = records.len(),
            errors = records.iter().filter(|r| r.is_error()).count(),
            "aggregate fetch complete"
        );
        records
    }

    /// Fetch every valid site of one domain concurrently.
    ///
    /// An empty result means no usable site is configured.
    pub async fn fetch_domain(&self, domain: Domain) -> Vec<DeviceRecord> {
        self.fetch_domain_outcomes(domain)
            .await
            .into_iter()
            .flat_map(SiteOutcome::into_records)
            .collect()
    }

    /// Resolve a free-text keyword, then fetch that domain.
    pub async fn fetch_keyword(&self, keyword: &str) -> Result<Vec<DeviceRecord>, CoreError> {
        let domain = query::resolve_domain(keyword)?;
        Ok(self.fetch_domain(domain).await)
    }

    /// Per-site outcomes of one domain, in completion order.
    pub async fn fetch_domain_outcomes(&self, domain: Domain) -> Vec<SiteOutcome> {
        let sites = self.inner.registry.sites(domain);
        if sites.is_empty() {
            debug!(%domain, "no configured sites");
            return Vec::new();
        }

        let limit = self
            .inner
            .config
            .max_site_concurrency
            .unwrap_or(sites.len())
            .max(1);
        let permits = Arc::new(Semaphore::new(limit));
        let timeout = self.inner.config.timeout;

        let mut tasks = JoinSet::new();
        let mut pending = Vec::with_capacity(sites.len());
        for site in sites {
            let site = Arc::new(site);
            let permits = Arc::clone(&permits);
            let task_site = Arc::clone(&site);
            let handle = tasks.spawn(async move {
                // Closed semaphores never happen here; run unbounded if one does.
                let _permit = permits.acquire_owned().await.ok();
                debug!(domain = %task_site.domain, site = %task_site.name, "site fetch started");
                let result = adapter::fetch_site(&task_site, timeout).await;
                SiteOutcome::from_result(&task_site, result)
            });
            pending.push((handle.id(), site));
        }

        let mut outcomes = Vec::with_capacity(pending.len());
        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((_, outcome)) => outcomes.push(outcome),
                Err(e) => {
                    let site = pending
                        .iter()
                        .find(|(id, _)| *id == e.id())
                        .map(|(_, site)| Arc::clone(site));
                    outcomes.push(SiteOutcome::Failed(join_error_record(domain, site.as_deref(), &e)));
                }
            }
        }
        outcomes
    }
}

impl InventorySource for Collector {
    fn fetch_all(&self) -> impl Future<Output = Vec<DeviceRecord>> + Send {
        Collector::fetch_all(self)
    }
}

/// Error record for a site task that panicked or was cancelled.
pub fn join_error_record(domain: Domain, site: Option<&SiteConfig>, err: &JoinError) -> DeviceRecord {
    let reason = if err.is_panic() {
        "site task panicked"
    } else {
        "site task cancelled"
    };
    warn!(%domain, site = site.map(|s| s.name.as_str()), "{reason}");
    match site {
        Some(site) => DeviceRecord::site_error(domain, site.name.clone(), reason),
        None => DeviceRecord {
            controller: None,
            ..DeviceRecord::site_error(domain, String::new(), reason)
        },
    }
}
