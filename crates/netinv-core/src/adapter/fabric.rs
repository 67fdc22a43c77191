// Fabric controller adapter: token login, then the fabric node class listing.

use url::Url;

use netinv_api::{FabricClient, TransportConfig};

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
    let client = FabricClient::new(base, transport)?;
    client.login(username, password).await?;
    let nodes = client.list_nodes().await?;

    let dashboard = dashboard_base(client.base_url());
    Ok(nodes
        .into_iter()
        .map(|node| convert::fabric_node(node, &dashboard))
        .collect())
}
