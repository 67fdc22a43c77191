// WAN-overlay adapter: form login whose session cookie authorizes the
// device listing.

use url::Url;

use netinv_api::{TransportConfig, WanOverlayClient};

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
    let client = WanOverlayClient::new(base, transport)?;
    client.login(username, password).await?;
    let devices = client.list_devices().await?;

    let dashboard = dashboard_base(client.base_url());
    Ok(devices
        .into_iter()
        .map(|device| convert::overlay_device(device, &dashboard))
        .collect())
}
