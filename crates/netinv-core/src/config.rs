// ── Runtime site configuration ──
//
// These types describe *how* to reach one controller site. They carry
// credential data and connection tuning, but never touch disk: the
// registry crate reads files and hands raw descriptors in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::CoreError;
use crate::model::Domain;

/// Default cloud-access API base when a site omits its address.
pub const CLOUD_ACCESS_DEFAULT_ADDRESS: &str = netinv_api::cloud_access::DEFAULT_BASE_URL;

/// How a site authenticates.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Username/password session login (fabric, assurance, wan-overlay).
    Basic {
        username: String,
        password: SecretString,
    },
    /// Static API key scoped to one organization (cloud-access).
    ApiKey { key: SecretString, org_id: String },
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification. Default for on-prem controllers with self-signed certs.
    #[default]
    DangerAcceptInvalid,
}

impl From<&TlsVerification> for netinv_api::TlsMode {
    fn from(tls: &TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => Self::System,
            TlsVerification::CustomCa(path) => Self::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => Self::DangerAcceptInvalid,
        }
    }
}

/// A validated, ready-to-fetch controller site.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub domain: Domain,
    /// Display name; becomes the `controller` field of every record.
    pub name: String,
    /// Controller address; bare hosts get an `https://` scheme at fetch time.
    pub address: String,
    pub credentials: Credentials,
    pub proxy: Option<String>,
    pub tls: TlsVerification,
}

/// A site entry as read from the registry, before validation.
///
/// Every field is optional here; [`SiteDescriptor::validate`] decides
/// which ones the domain actually requires.
#[derive(Debug, Clone, Default)]
pub struct SiteDescriptor {
    pub name: Option<String>,
    pub address: Option<String>,
    pub username: Option<String>,
    pub password: Option<SecretString>,
    pub api_key: Option<SecretString>,
    pub org_id: Option<String>,
    pub proxy: Option<String>,
    /// Per-site override of the registry-wide verification default.
    pub insecure: Option<bool>,
    pub ca_cert: Option<PathBuf>,
}

impl SiteDescriptor {
    /// Check required fields for `domain` and build a [`SiteConfig`].
    ///
    /// `index` names unnamed sites (`site-1`, `site-2`, ...) so error
    /// messages can still point at the entry.
    pub fn validate(
        &self,
        domain: Domain,
        index: usize,
        default_insecure: bool,
    ) -> Result<SiteConfig, CoreError> {
        let name = non_empty(self.name.as_deref())
            .map_or_else(|| format!("site-{}", index + 1), str::to_owned);

        let missing = |field: &'static str| CoreError::ConfigMissing {
            domain,
            site: name.clone(),
            field,
        };

        let (address, credentials) = match domain {
            Domain::CloudAccessController => {
                let key = self.api_key.clone().ok_or_else(|| missing("api_key"))?;
                let org_id = non_empty(self.org_id.as_deref()).ok_or_else(|| missing("org_id"))?;
                let address = non_empty(self.address.as_deref())
                    .unwrap_or(CLOUD_ACCESS_DEFAULT_ADDRESS)
                    .to_owned();
                (
                    address,
                    Credentials::ApiKey {
                        key,
                        org_id: org_id.to_owned(),
                    },
                )
            }
            Domain::FabricController
            | Domain::AssuranceController
            | Domain::WanOverlayController => {
                let address = non_empty(self.address.as_deref()).ok_or_else(|| missing("address"))?;
                let username =
                    non_empty(self.username.as_deref()).ok_or_else(|| missing("username"))?;
                let password = self.password.clone().ok_or_else(|| missing("password"))?;
                (
                    address.to_owned(),
                    Credentials::Basic {
                        username: username.to_owned(),
                        password,
                    },
                )
            }
        };

        let tls = match (&self.ca_cert, self.insecure.unwrap_or(default_insecure)) {
            (Some(path), _) => TlsVerification::CustomCa(path.clone()),
            (None, true) => TlsVerification::DangerAcceptInvalid,
            (None, false) => TlsVerification::SystemDefaults,
        };

        Ok(SiteConfig {
            domain,
            name,
            address,
            credentials,
            proxy: non_empty(self.proxy.as_deref()).map(str::to_owned),
            tls,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Collector-wide tuning.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Per-HTTP-call budget.
    pub timeout: Duration,
    /// Freshness window of the aggregate cache.
    pub cache_ttl: Duration,
    /// TLS default for sites that set neither `insecure` nor `ca_cert`.
    pub insecure: bool,
    /// Upper bound on concurrently fetched sites per domain. `None` = all at once.
    pub max_site_concurrency: Option<usize>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            timeout: netinv_api::transport::DEFAULT_TIMEOUT,
            cache_ttl: Duration::from_secs(300),
            insecure: true,
            max_site_concurrency: None,
        }
    }
}
