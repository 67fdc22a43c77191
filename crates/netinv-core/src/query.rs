// ── Read-only queries over an aggregate ──
//
// Pure functions: none of these touch the network or the cache.

use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::error::CoreError;
use crate::model::{ControllerCount, DeviceRecord, Domain, DomainTag, Summary};

/// Resolve a free-text keyword to a domain.
///
/// Case-insensitive substring match against each domain's keywords, in
/// domain order; the first domain with a hit wins.
pub fn resolve_domain(keyword: &str) -> Result<Domain, CoreError> {
    let lowered = keyword.trim().to_lowercase();
    if !lowered.is_empty() {
        for domain in Domain::all() {
            if domain.keywords().iter().any(|k| lowered.contains(k)) {
                return Ok(domain);
            }
        }
    }

    let available = Domain::all()
        .flat_map(|d| d.keywords().iter().copied())
        .collect::<Vec<_>>()
        .join(", ");
    Err(CoreError::DomainUnresolved {
        keyword: keyword.to_owned(),
        available,
    })
}

/// Device records whose name, serial, ip, or id contains `query`.
///
/// Case-insensitive. Error records never match; an empty query returns
/// every device record.
pub fn search<'a>(records: &'a [DeviceRecord], query: &str) -> Vec<&'a DeviceRecord> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|r| {
            let Some(info) = r.device_info() else {
                return false;
            };
            if needle.is_empty() {
                return true;
            }
            [
                Some(info.name.as_str()),
                info.serial.as_deref(),
                info.ip.as_deref(),
                Some(info.id.as_str()),
            ]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Error records plus devices whose status is a health issue.
pub fn unhealthy(records: &[DeviceRecord]) -> Vec<&DeviceRecord> {
    records.iter().filter(|r| r.is_unhealthy()).collect()
}

/// Totals for the summary view.
///
/// `total_devices` and `by_domain` count device records only; every
/// domain is present even at zero. `health_issues` includes error records.
pub fn summarize(records: &[DeviceRecord]) -> Summary {
    let mut summary = Summary::default();
    for record in records {
        if record.is_unhealthy() {
            summary.health_issues += 1;
        }
        if record.is_error() {
            continue;
        }
        summary.total_devices += 1;
        if let Some(domain) = record.domain.domain() {
            *summary.by_domain.entry(domain).or_insert(0) += 1;
        }
    }
    summary
}

/// Device counts per (domain, controller), in domain then controller order.
pub fn controller_breakdown(records: &[DeviceRecord]) -> Vec<ControllerCount> {
    let mut counts: IndexMap<(DomainTag, String), usize> = IndexMap::new();
    for record in records.iter().filter(|r| !r.is_error()) {
        let controller = record.controller.clone().unwrap_or_default();
        *counts.entry((record.domain, controller)).or_insert(0) += 1;
    }

    let mut rows: Vec<ControllerCount> = counts
        .into_iter()
        .map(|((domain, controller), count)| ControllerCount {
            controller,
            domain,
            count,
        })
        .collect();
    rows.sort_by(|a, b| {
        tag_order(a.domain, b.domain).then_with(|| a.controller.cmp(&b.controller))
    });
    rows
}

/// Stable display order: domain, then controller, then device name.
///
/// System records sort last; error records sort by their message.
pub fn sort_for_display(records: &mut [DeviceRecord]) {
    records.sort_by(|a, b| {
        tag_order(a.domain, b.domain)
            .then_with(|| a.controller.cmp(&b.controller))
            .then_with(|| sort_name(a).cmp(sort_name(b)))
    });
}

fn tag_order(a: DomainTag, b: DomainTag) -> Ordering {
    match (a.domain(), b.domain()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn sort_name(record: &DeviceRecord) -> &str {
    record
        .device_info()
        .map(|info| info.name.as_str())
        .or_else(|| record.error_message())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::DeviceInfo;

    fn device(domain: Domain, site: &str, name: &str, status: &str) -> DeviceRecord {
        DeviceRecord::device(
            domain,
            site,
            DeviceInfo {
                id: format!("{name}-id"),
                name: name.into(),
                status: status.into(),
                model: None,
                serial: Some(format!("SN-{}", name.to_uppercase())),
                version: None,
                ip: Some("10.1.1.1".into()),
                dashboard_url: None,
            },
        )
    }

    fn sample() -> Vec<DeviceRecord> {
        vec![
            device(Domain::WanOverlayController, "Site-A", "edge-1", "online"),
            device(Domain::WanOverlayController, "Site-A", "edge-2", "offline"),
            DeviceRecord::site_error(Domain::WanOverlayController, "Site-B", "timed out"),
            device(Domain::FabricController, "DC-East", "leaf-101", "online"),
        ]
    }

    #[test]
    fn keyword_resolution_is_substring_and_case_insensitive() {
        assert_eq!(resolve_domain("ACI").ok(), Some(Domain::FabricController));
        assert_eq!(resolve_domain("meraki devices").ok(), Some(Domain::CloudAccessController));
        assert_eq!(resolve_domain("Catalyst").ok(), Some(Domain::AssuranceController));
        assert_eq!(resolve_domain("sd-wan").ok(), Some(Domain::WanOverlayController));
    }

    #[test]
    fn unknown_keyword_lists_options() {
        let err = resolve_domain("firewall").expect_err("unsupported");
        let text = err.to_string();
        assert!(text.contains("not a supported domain"));
        assert!(text.contains("meraki"));
        assert!(resolve_domain("").is_err());
    }

    #[test]
    fn search_skips_errors_and_matches_fields() {
        let records = sample();
        assert_eq!(search(&records, "").len(), 3);
        assert_eq!(search(&records, "EDGE").len(), 2);
        assert_eq!(search(&records, "sn-leaf").len(), 1);
        assert_eq!(search(&records, "timed").len(), 0);
    }

    #[test]
    fn search_keeps_surrounding_whitespace() {
        let records = sample();
        assert!(search(&records, "   ").is_empty());
        assert!(search(&records, " edge-1").is_empty());
        assert_eq!(search(&records, "edge-1").len(), 1);
    }

    #[test]
    fn unhealthy_includes_errors() {
        let records = sample();
        let bad = unhealthy(&records);
        assert_eq!(bad.len(), 2);
        assert!(bad.iter().any(|r| r.is_error()));
    }

    #[test]
    fn summary_counts_devices_and_issues() {
        let summary = summarize(&sample());
        assert_eq!(summary.total_devices, 3);
        assert_eq!(summary.health_issues, 2);
        assert_eq!(summary.by_domain[&Domain::WanOverlayController], 2);
        assert_eq!(summary.by_domain[&Domain::CloudAccessController], 0);
        assert_eq!(summary.by_domain.len(), 4);
    }

    #[test]
    fn breakdown_groups_by_controller() {
        let rows = controller_breakdown(&sample());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].controller, "DC-East");
        assert_eq!(rows[1].count, 2);
    }

    #[test]
    fn display_sort_is_domain_controller_name() {
        let mut records = sample();
        records.push(DeviceRecord::system_error("fan-out failed"));
        sort_for_display(&mut records);
        let names: Vec<&str> = records.iter().map(sort_name).collect();
        assert_eq!(
            names,
            vec!["leaf-101", "edge-1", "edge-2", "timed out", "fan-out failed"]
        );
    }
}
