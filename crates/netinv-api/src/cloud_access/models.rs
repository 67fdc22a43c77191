// Cloud-access controller response types
//
// Organization-scoped endpoints return bare JSON arrays with camelCase keys.
// Most fields are optional: unclaimed or never-connected devices omit them.

use serde::{Deserialize, Serialize};

/// One entry of `GET /organizations/{org}/devices`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudDevice {
    pub serial: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub firmware: Option<String>,
    #[serde(default)]
    pub lan_ip: Option<String>,
}

/// One entry of `GET /organizations/{org}/devices/statuses`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudDeviceStatus {
    pub serial: String,
    /// `online`, `alerting`, `offline`, or `dormant`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub lan_ip: Option<String>,
}
