// ── Site registry ──
//
// Per-domain list of configured controller sites. Entries are stored
// raw and validated on read, so a site missing credentials is simply
// absent from `sites()` and never reaches the network.

use std::collections::HashMap;

use tracing::debug;

use crate::config::{SiteConfig, SiteDescriptor};
use crate::model::Domain;

/// Source of configured sites for each domain.
#[derive(Debug, Clone, Default)]
pub struct SiteRegistry {
    entries: HashMap<Domain, Vec<SiteDescriptor>>,
    default_insecure: bool,
}

impl SiteRegistry {
    /// Empty registry; every domain reports zero sites.
    pub fn new(default_insecure: bool) -> Self {
        Self {
            entries: HashMap::new(),
            default_insecure,
        }
    }

    /// Append a raw site entry to `domain`.
    pub fn add(&mut self, domain: Domain, descriptor: SiteDescriptor) -> &mut Self {
        self.entries.entry(domain).or_default().push(descriptor);
        self
    }

    /// Builder form of [`add`](Self::add).
    #[must_use]
    pub fn with_site(mut self, domain: Domain, descriptor: SiteDescriptor) -> Self {
        self.add(domain, descriptor);
        self
    }

    /// Validated sites of `domain`, in registry order.
    ///
    /// Entries lacking a required field are dropped with a debug log.
    pub fn sites(&self, domain: Domain) -> Vec<SiteConfig> {
        let Some(entries) = self.entries.get(&domain) else {
            return Vec::new();
        };
        entries
            .iter()
            .enumerate()
            .filter_map(|(index, desc)| match desc.validate(domain, index, self.default_insecure) {
                Ok(site) => Some(site),
                Err(e) => {
                    debug!(%domain, error = %e, "skipping incomplete site");
                    None
                }
            })
            .collect()
    }

    /// Raw entries of `domain`, valid or not, for display.
    pub fn descriptors(&self, domain: Domain) -> &[SiteDescriptor] {
        self.entries.get(&domain).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of raw entries for `domain`, valid or not.
    pub fn site_count(&self, domain: Domain) -> usize {
        self.descriptors(domain).len()
    }

    pub fn default_insecure(&self) -> bool {
        self.default_insecure
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(Vec::is_empty)
    }
}
