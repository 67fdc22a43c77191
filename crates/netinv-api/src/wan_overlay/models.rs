// WAN-overlay manager response types
//
// Data service replies wrap rows in `{ "header": {...}, "data": [...] }`;
// row keys are kebab-case.

use serde::{Deserialize, Serialize};

/// The data service envelope. Only `data` is used.
#[derive(Debug, Deserialize)]
pub struct DataResponse<T> {
    pub data: Vec<T>,
}

/// One row of `GET /dataservice/device`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OverlayDevice {
    pub uuid: String,
    #[serde(default)]
    pub host_name: Option<String>,
    /// `normal`, `warning`, `error`, ...
    #[serde(default)]
    pub status: Option<String>,
    /// `reachable` or `unreachable`.
    #[serde(default)]
    pub reachability: Option<String>,
    #[serde(default)]
    pub device_model: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub system_ip: Option<String>,
}
