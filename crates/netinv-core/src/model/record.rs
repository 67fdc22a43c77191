// ── Normalized inventory records ──

use serde::{Deserialize, Serialize};

use super::domain::{Domain, DomainTag};

/// Normalized health vocabulary shared by every adapter.
///
/// Adapters map native states onto these where a mapping exists and
/// fall back to the lower-cased native value otherwise.
pub mod status {
    pub const ONLINE: &str = "online";
    pub const OFFLINE: &str = "offline";
    pub const UNREACHABLE: &str = "unreachable";
    pub const INACTIVE: &str = "inactive";
    pub const ALERTING: &str = "alerting";
    pub const ERROR: &str = "error";
    pub const UNKNOWN: &str = "unknown";

    /// Statuses counted as health issues.
    pub const UNHEALTHY: &[&str] = &[OFFLINE, UNREACHABLE, ERROR, INACTIVE, ALERTING, UNKNOWN];

    /// Whether a (case-insensitive) status is a health issue.
    pub fn is_unhealthy(value: &str) -> bool {
        let lowered = value.trim().to_ascii_lowercase();
        UNHEALTHY.contains(&lowered.as_str())
    }
}

/// Device fields of a successful inventory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Adapter-scoped identifier; not globally unique.
    pub id: String,
    pub name: String,
    pub status: String,
    pub model: Option<String>,
    /// Serial number, or UUID for overlay devices.
    pub serial: Option<String>,
    pub version: Option<String>,
    /// Management or system IP.
    pub ip: Option<String>,
    pub dashboard_url: Option<String>,
}

/// Exactly one of device fields or an error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordBody {
    Device(DeviceInfo),
    Error { error: String },
}

/// One normalized inventory entry (device or failure) produced by an adapter.
///
/// Wire shape (success): `{id, domain, controller, name, status, model,
/// serial, version, ip, dashboard_url}`; (error): `{domain, controller, error}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub domain: DomainTag,
    /// Owning site display name; absent only for system-level faults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<String>,
    #[serde(flatten)]
    pub body: RecordBody,
}

impl DeviceRecord {
    /// A successful device entry reported by the named controller.
    pub fn device(domain: Domain, controller: impl Into<String>, info: DeviceInfo) -> Self {
        Self {
            domain: domain.into(),
            controller: Some(controller.into()),
            body: RecordBody::Device(info),
        }
    }

    /// A failure attributed to one site of a domain.
    pub fn site_error(domain: Domain, controller: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            controller: Some(controller.into()),
            body: RecordBody::Error {
                error: error.into(),
            },
        }
    }

    /// A failure of the aggregator itself.
    pub fn system_error(error: impl Into<String>) -> Self {
        Self {
            domain: DomainTag::System,
            controller: None,
            body: RecordBody::Error {
                error: error.into(),
            },
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.body, RecordBody::Error { .. })
    }

    /// Device fields, if this is a success record.
    pub fn device_info(&self) -> Option<&DeviceInfo> {
        match &self.body {
            RecordBody::Device(info) => Some(info),
            RecordBody::Error { .. } => None,
        }
    }

    /// Error message, if this is an error record.
    pub fn error_message(&self) -> Option<&str> {
        match &self.body {
            RecordBody::Device(_) => None,
            RecordBody::Error { error } => Some(error),
        }
    }

    /// Carries an error, or reports a status in the unhealthy vocabulary.
    pub fn is_unhealthy(&self) -> bool {
        match &self.body {
            RecordBody::Device(info) => status::is_unhealthy(&info.status),
            RecordBody::Error { .. } => true,
        }
    }
}
