// Assurance controller response types

use serde::{Deserialize, Serialize};

/// Reply of `POST /dna/system/api/v1/auth/token`.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(rename = "Token")]
    pub token: String,
}

/// The `{ "response": [...], "version": "1.0" }` envelope of intent API calls.
#[derive(Debug, Deserialize)]
pub struct IntentResponse<T> {
    pub response: Vec<T>,
}

/// One entry of `GET /dna/intent/api/v1/network-device`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDevice {
    pub id: String,
    #[serde(default)]
    pub hostname: Option<String>,
    /// `Reachable`, `Unreachable`, `PingReachable`, ...
    #[serde(default)]
    pub reachability_status: Option<String>,
    #[serde(default)]
    pub platform_id: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub software_version: Option<String>,
    #[serde(default)]
    pub management_ip_address: Option<String>,
}
