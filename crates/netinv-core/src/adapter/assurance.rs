// Assurance controller adapter: basic-auth token exchange, then the
// network-device collection.

use url::Url;

use netinv_api::{AssuranceClient, TransportConfig};

use super::{basic_credentials, dashboard_base};
use crate::config::SiteConfig;
use crate::convert;
use crate::error::CoreError;
use crate::model::DeviceInfo;

pub(super) async fn fetch(
    site: &SiteConfig,
    base: Url,
    transport: &TransportConfig,
) -> Result<Vec<DeviceInfo>, CoreError> {
    let (username, password) = basic_credentials(site)?;
    let client = AssuranceClient::new(base, transport)?;
    client.authenticate(username, password).await?;
    let devices = client.list_network_devices().await?;

    let dashboard = dashboard_base(client.base_url());
    Ok(devices
        .into_iter()
        .map(|device| convert::assurance_device(device, &dashboard))
        .collect())
}
