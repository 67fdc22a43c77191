// WAN-overlay manager HTTP client
//
// `POST /j_security_check` with form credentials sets a session cookie in
// the client's jar; subsequent data service calls ride on that cookie.
// A failed login still answers 200, but with the HTML login page.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::{self, TransportConfig};
use crate::wan_overlay::models::{DataResponse, OverlayDevice};

/// Raw HTTP client for a WAN-overlay manager.
pub struct WanOverlayClient {
    http: reqwest::Client,
    base_url: Url,
    transport: TransportConfig,
}

impl WanOverlayClient {
    /// Create a client for the manager at `base_url`.
    ///
    /// If the transport config doesn't already include a cookie jar, one is
    /// created automatically (session auth requires cookies).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let http = config.build_client()?;
        Ok(Self {
            http,
            base_url,
            transport: config,
        })
    }

    /// The manager base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Open a session with form credentials.
    ///
    /// `POST /j_security_check`
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        let url = transport::endpoint(&self.base_url, "j_security_check")?;
        debug!("logging in at {}", url);

        let form = [
            ("j_username", username),
            ("j_password", password.expose_secret()),
        ];

        let resp = self
            .http
            .post(url)
            .form(&form)
            .send()
            .await
            .map_err(|e| self.transport.send_error(e))?;

        let resp = transport::check_status(resp).await?;
        let body = resp.text().await.map_err(Error::Transport)?;
        if body.to_ascii_lowercase().contains("<html") {
            return Err(Error::Authentication {
                message: "login page returned; credentials rejected".into(),
            });
        }

        debug!("session established");
        Ok(())
    }

    /// List every device in the overlay.
    ///
    /// `GET /dataservice/device`
    pub async fn list_devices(&self) -> Result<Vec<OverlayDevice>, Error> {
        let url = transport::endpoint(&self.base_url, "dataservice/device")?;
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport.send_error(e))?;

        let reply: DataResponse<OverlayDevice> = transport::read_json(resp).await?;
        Ok(reply.data)
    }
}
