// ── Domain adapters ──
//
// One adapter per controller family. Each knows how to authenticate
// against its controller, which collection to fetch, and how to turn the
// reply into normalized records. Adapters are stateless: every call
// builds its own HTTP client from the site config.

mod assurance;
mod cloud_access;
mod fabric;
mod wan_overlay;

use std::time::Duration;

use secrecy::SecretString;
use tracing::debug;
use url::Url;

use netinv_api::TransportConfig;

use crate::config::{Credentials, SiteConfig};
use crate::error::CoreError;
use crate::model::{DeviceRecord, Domain};

/// Fetch and normalize one site's inventory.
///
/// Every record carries the site's domain and display name. Failures
/// come back as `Err` for the caller to turn into an error record.
pub async fn fetch_site(site: &SiteConfig, timeout: Duration) -> Result<Vec<DeviceRecord>, CoreError> {
    let transport = transport_for(site, timeout);
    let base = netinv_api::transport::parse_base_url(&site.address)?;
    debug!(domain = %site.domain, site = %site.name, base = %base, "fetching site inventory");

    let infos = match site.domain {
        Domain::FabricController => fabric::fetch(site, base, &transport).await?,
        Domain::CloudAccessController => cloud_access::fetch(site, base, &transport).await?,
        Domain::AssuranceController => assurance::fetch(site, base, &transport).await?,
        Domain::WanOverlayController => wan_overlay::fetch(site, base, &transport).await?,
    };

    Ok(infos
        .into_iter()
        .map(|info| DeviceRecord::device(site.domain, site.name.clone(), info))
        .collect())
}

/// Per-site transport: the collector's timeout plus the site's TLS and proxy.
pub fn transport_for(site: &SiteConfig, timeout: Duration) -> TransportConfig {
    TransportConfig {
        tls: (&site.tls).into(),
        timeout,
        proxy: site.proxy.clone(),
        cookie_jar: None,
    }
}

/// Username/password pair of a session-login site.
fn basic_credentials(site: &SiteConfig) -> Result<(&str, &SecretString), CoreError> {
    match &site.credentials {
        Credentials::Basic { username, password } => Ok((username.as_str(), password)),
        Credentials::ApiKey { .. } => Err(CoreError::ConfigMissing {
            domain: site.domain,
            site: site.name.clone(),
            field: "password",
        }),
    }
}

/// Keep the parsed base for adapters that link back into the controller UI.
fn dashboard_base(base: &Url) -> Url {
    let mut base = base.clone();
    base.set_query(None);
    base.set_fragment(None);
    if !base.username().is_empty() {
        let _ = base.set_username("");
        let _ = base.set_password(None);
    }
    base
}
