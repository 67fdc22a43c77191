// Cloud-access controller HTTP client
//
// Every request carries the organization API key as a default header,
// so there is no login step.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::cloud_access::models::{CloudDevice, CloudDeviceStatus};
use crate::error::Error;
use crate::transport::{self, TransportConfig};

/// Public API base used when a site does not configure its own address.
pub const DEFAULT_BASE_URL: &str = "https://api.meraki.com/api/v1";

/// Header carrying the organization API key.
pub const API_KEY_HEADER: &str = "X-Cisco-Meraki-API-Key";

/// Async client for one organization of the cloud-access controller.
pub struct CloudAccessClient {
    http: reqwest::Client,
    base_url: Url,
    org_id: String,
    transport: TransportConfig,
}

impl CloudAccessClient {
    /// Build from an API key, organization id, and transport config.
    ///
    /// Injects the API key as a sensitive default header on every request.
    pub fn from_api_key(
        base_url: Url,
        api_key: &SecretString,
        org_id: impl Into<String>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut key_value =
            HeaderValue::from_str(api_key.expose_secret()).map_err(|_| Error::InvalidApiKey)?;
        key_value.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key_value);

        let http = transport.build_client_with_headers(headers)?;
        Ok(Self {
            http,
            base_url,
            org_id: org_id.into(),
            transport: transport.clone(),
        })
    }

    /// The organization this client is scoped to.
    pub fn org_id(&self) -> &str {
        &self.org_id
    }

    /// List the device inventory of the organization.
    ///
    /// `GET /organizations/{org}/devices`
    pub async fn list_devices(&self) -> Result<Vec<CloudDevice>, Error> {
        self.get(&format!("organizations/{}/devices", self.org_id))
            .await
    }

    /// List the connectivity status of every device in the organization.
    ///
    /// `GET /organizations/{org}/devices/statuses`
    pub async fn list_device_statuses(&self) -> Result<Vec<CloudDeviceStatus>, Error> {
        self.get(&format!("organizations/{}/devices/statuses", self.org_id))
            .await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = transport::endpoint(&self.base_url, path)?;
        debug!("GET {url}");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport.send_error(e))?;

        transport::read_json(resp).await
    }
}
