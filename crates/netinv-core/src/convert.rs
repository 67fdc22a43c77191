// ── API-to-record conversions ──
//
// Bridges raw `netinv_api` response types into normalized `DeviceInfo`.
// Each function maps native status vocabularies onto the shared one and
// fills fallbacks for missing optional data.

use std::collections::HashMap;

use url::Url;

use netinv_api::assurance::models::NetworkDevice;
use netinv_api::cloud_access::models::{CloudDevice, CloudDeviceStatus};
use netinv_api::fabric::models::FabricNode;
use netinv_api::wan_overlay::models::OverlayDevice;

use crate::model::{DeviceInfo, status};

// ── Helpers ────────────────────────────────────────────────────────

/// Lower-case and trim a native status, `unknown` when absent or blank.
fn lowered_or_unknown(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map_or_else(|| status::UNKNOWN.to_owned(), str::to_ascii_lowercase)
}

/// Drop empty strings some controllers return in place of null.
fn present(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.trim().is_empty())
}

fn base_str(base: &Url) -> String {
    base.as_str().trim_end_matches('/').to_owned()
}

// ── Fabric ─────────────────────────────────────────────────────────

/// Map the fabric membership state (`fabricSt`) onto the shared vocabulary.
///
/// Known values: `active`, `inactive`, `disabled`, `decommissioned`,
/// `unknown`. Anything else passes through lower-cased.
pub fn fabric_status(raw: Option<&str>) -> String {
    let lowered = lowered_or_unknown(raw);
    match lowered.as_str() {
        "active" => status::ONLINE.to_owned(),
        "disabled" | "decommissioned" => status::OFFLINE.to_owned(),
        _ => lowered,
    }
}

pub fn fabric_node(node: FabricNode, base: &Url) -> DeviceInfo {
    let id = present(node.dn)
        .or_else(|| present(node.id.clone()))
        .unwrap_or_default();
    let name = present(node.name)
        .or_else(|| node.id.map(|id| format!("node-{id}")))
        .unwrap_or_else(|| id.clone());
    DeviceInfo {
        status: fabric_status(node.fabric_st.as_deref()),
        id,
        name,
        model: present(node.model),
        serial: present(node.serial),
        version: present(node.version),
        ip: present(node.address),
        dashboard_url: Some(base.as_str().to_owned()),
    }
}

// ── Cloud access ───────────────────────────────────────────────────

/// Map a cloud-access device status; `dormant` devices count as inactive.
pub fn cloud_status(raw: Option<&str>) -> String {
    let lowered = lowered_or_unknown(raw);
    match lowered.as_str() {
        "dormant" => status::INACTIVE.to_owned(),
        _ => lowered,
    }
}

/// Deep link into the cloud dashboard's inventory view for one serial.
pub fn cloud_dashboard_url(org_id: &str, serial: &str) -> String {
    format!(
        "https://dashboard.meraki.com/o/{org_id}/manage/organization/inventory?search={serial}"
    )
}

/// Join the inventory and status listings by serial.
///
/// Devices absent from the status listing report `unknown`. Status
/// entries with no matching inventory device are ignored.
pub fn cloud_devices(
    devices: Vec<CloudDevice>,
    statuses: Vec<CloudDeviceStatus>,
    org_id: &str,
) -> Vec<DeviceInfo> {
    let by_serial: HashMap<String, CloudDeviceStatus> = statuses
        .into_iter()
        .map(|s| (s.serial.clone(), s))
        .collect();

    devices
        .into_iter()
        .map(|device| {
            let st = by_serial.get(&device.serial);
            let ip = present(device.lan_ip)
                .or_else(|| st.and_then(|s| present(s.lan_ip.clone())))
                .unwrap_or_else(|| "Cloud".to_owned());
            DeviceInfo {
                id: device.serial.clone(),
                name: present(device.name).unwrap_or_else(|| device.serial.clone()),
                status: cloud_status(st.and_then(|s| s.status.as_deref())),
                model: present(device.model),
                dashboard_url: Some(cloud_dashboard_url(org_id, &device.serial)),
                serial: Some(device.serial),
                version: present(device.firmware),
                ip: Some(ip),
            }
        })
        .collect()
}

// ── Assurance ──────────────────────────────────────────────────────

/// Map reachability (`Reachable`, `Unreachable`, `PingReachable`, ...).
pub fn assurance_status(raw: Option<&str>) -> String {
    let lowered = lowered_or_unknown(raw);
    match lowered.as_str() {
        "reachable" => status::ONLINE.to_owned(),
        "unreachable" => status::UNREACHABLE.to_owned(),
        _ => lowered,
    }
}

pub fn assurance_device(device: NetworkDevice, base: &Url) -> DeviceInfo {
    let dashboard_url = format!(
        "{}/dna/assurance/device/details?id={}",
        base_str(base),
        device.id
    );
    DeviceInfo {
        name: present(device.hostname).unwrap_or_else(|| device.id.clone()),
        status: assurance_status(device.reachability_status.as_deref()),
        model: present(device.platform_id),
        serial: present(device.serial_number),
        version: present(device.software_version),
        ip: present(device.management_ip_address),
        dashboard_url: Some(dashboard_url),
        id: device.id,
    }
}

// ── WAN overlay ────────────────────────────────────────────────────

/// Map overlay health; `reachability: unreachable` overrides the status field.
pub fn overlay_status(reachability: Option<&str>, raw: Option<&str>) -> String {
    if reachability.is_some_and(|r| r.trim().eq_ignore_ascii_case("unreachable")) {
        return status::UNREACHABLE.to_owned();
    }
    let lowered = lowered_or_unknown(raw);
    match lowered.as_str() {
        "normal" => status::ONLINE.to_owned(),
        "warning" => status::ALERTING.to_owned(),
        "error" => status::ERROR.to_owned(),
        _ => lowered,
    }
}

pub fn overlay_device(device: OverlayDevice, base: &Url) -> DeviceInfo {
    let system_ip = present(device.system_ip);
    let dashboard_url = format!(
        "{}/#/app/monitor/network/system?deviceId={}",
        base_str(base),
        system_ip.as_deref().unwrap_or(&device.uuid)
    );
    DeviceInfo {
        name: present(device.host_name).unwrap_or_else(|| device.uuid.clone()),
        status: overlay_status(device.reachability.as_deref(), device.status.as_deref()),
        model: present(device.device_model),
        serial: Some(device.uuid.clone()),
        version: present(device.version),
        ip: system_ip,
        dashboard_url: Some(dashboard_url),
        id: device.uuid,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).expect("valid url")
    }

    #[test]
    fn fabric_states_normalize() {
        assert_eq!(fabric_status(Some("active")), "online");
        assert_eq!(fabric_status(Some("inactive")), "inactive");
        assert_eq!(fabric_status(Some("decommissioned")), "offline");
        assert_eq!(fabric_status(None), "unknown");
        assert_eq!(fabric_status(Some("In-Service")), "in-service");
    }

    #[test]
    fn fabric_node_prefers_dn_for_id() {
        let node: FabricNode = serde_json::from_value(json!({
            "dn": "topology/pod-1/node-101", "id": "101", "name": "leaf-101",
            "fabricSt": "active", "address": "10.0.72.64"
        }))
        .expect("node");
        let info = fabric_node(node, &url("https://apic1.example.net/"));
        assert_eq!(info.id, "topology/pod-1/node-101");
        assert_eq!(info.status, "online");
        assert_eq!(info.dashboard_url.as_deref(), Some("https://apic1.example.net/"));
    }

    #[test]
    fn cloud_join_fills_unknown_and_fallbacks() {
        let devices: Vec<CloudDevice> = serde_json::from_value(json!([
            { "serial": "Q2XX-AAAA", "name": "lobby-ap", "model": "MR46", "lanIp": "192.168.10.20" },
            { "serial": "Q2XX-BBBB", "model": "MS120-8" },
            { "serial": "Q2XX-CCCC", "name": "" }
        ]))
        .expect("devices");
        let statuses: Vec<CloudDeviceStatus> = serde_json::from_value(json!([
            { "serial": "Q2XX-AAAA", "status": "online" },
            { "serial": "Q2XX-BBBB", "status": "dormant", "lanIp": "192.168.10.30" },
            { "serial": "Q2XX-ZZZZ", "status": "offline" }
        ]))
        .expect("statuses");

        let infos = cloud_devices(devices, statuses, "42");
        assert_eq!(infos.len(), 3);
        assert_eq!(infos[0].status, "online");
        assert_eq!(infos[1].status, "inactive");
        assert_eq!(infos[1].name, "Q2XX-BBBB");
        assert_eq!(infos[1].ip.as_deref(), Some("192.168.10.30"));
        assert_eq!(infos[2].status, "unknown");
        assert_eq!(infos[2].ip.as_deref(), Some("Cloud"));
        assert_eq!(
            infos[0].dashboard_url.as_deref(),
            Some("https://dashboard.meraki.com/o/42/manage/organization/inventory?search=Q2XX-AAAA")
        );
    }

    #[test]
    fn assurance_reachability_normalizes() {
        assert_eq!(assurance_status(Some("Reachable")), "online");
        assert_eq!(assurance_status(Some("Unreachable")), "unreachable");
        assert_eq!(assurance_status(Some("PingReachable")), "pingreachable");
    }

    #[test]
    fn assurance_dashboard_link() {
        let device: NetworkDevice = serde_json::from_value(json!({
            "id": "abc-1", "hostname": "cat9k-core-1", "reachabilityStatus": "Reachable"
        }))
        .expect("device");
        let info = assurance_device(device, &url("https://dnac.example.net"));
        assert_eq!(
            info.dashboard_url.as_deref(),
            Some("https://dnac.example.net/dna/assurance/device/details?id=abc-1")
        );
    }

    #[test]
    fn overlay_uuid_is_id_and_serial() {
        let device: OverlayDevice = serde_json::from_value(json!({
            "uuid": "C8K-1f0e", "host-name": "branch-edge-1", "status": "warning",
            "reachability": "reachable", "system-ip": "1.1.1.10"
        }))
        .expect("device");
        let info = overlay_device(device, &url("https://vmanage.example.net:8443/"));
        assert_eq!(info.id, "C8K-1f0e");
        assert_eq!(info.serial.as_deref(), Some("C8K-1f0e"));
        assert_eq!(info.status, "alerting");
        assert_eq!(
            info.dashboard_url.as_deref(),
            Some("https://vmanage.example.net:8443/#/app/monitor/network/system?deviceId=1.1.1.10")
        );
    }

    #[test]
    fn overlay_unreachable_wins() {
        assert_eq!(overlay_status(Some("unreachable"), Some("normal")), "unreachable");
        assert_eq!(overlay_status(None, Some("normal")), "online");
        assert_eq!(overlay_status(None, None), "unknown");
    }
}
