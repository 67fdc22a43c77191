// ── Aggregate statistics ──

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::domain::{Domain, DomainTag};

/// Headline numbers over one aggregate.
///
/// `total_devices` and `by_domain` count device records only; error records
/// show up in `health_issues` alongside devices with an unhealthy status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_devices: usize,
    /// Every domain is present, in declaration order, zero when empty.
    pub by_domain: IndexMap<Domain, usize>,
    pub health_issues: usize,
}

impl Default for Summary {
    fn default() -> Self {
        Self {
            total_devices: 0,
            by_domain: Domain::all().map(|d| (d, 0)).collect(),
            health_issues: 0,
        }
    }
}

/// Device count for one controller (site), with its owning domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerCount {
    pub controller: String,
    pub domain: DomainTag,
    pub count: usize,
}
