// Cloud-access adapter: API key header, inventory and status listings
// fetched concurrently and joined by serial.

use url::Url;

use netinv_api::{CloudAccessClient, TransportConfig};

use crate::config::{Credentials, SiteConfig};
use crate::convert;
use crate::error::CoreError;
use crate::model::DeviceInfo;

pub(super) async fn fetch(
    site: &SiteConfig,
    base: Url,
    transport: &TransportConfig,
) -> Result<Vec<DeviceInfo>, CoreError> {
    let Credentials::ApiKey { key, org_id } = &site.credentials else {
        return Err(CoreError::ConfigMissing {
            domain: site.domain,
            site: site.name.clone(),
            field: "api_key",
        });
    };

    let client = CloudAccessClient::from_api_key(base, key, org_id.as_str(), transport)?;
    let (devices, statuses) = tokio::join!(client.list_devices(), client.list_device_statuses());

    Ok(convert::cloud_devices(devices?, statuses?, client.org_id()))
}
