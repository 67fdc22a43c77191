// Assurance controller HTTP client
//
// Basic credentials buy a short-lived token; intent API calls carry it in
// the `X-Auth-Token` header.

use std::sync::RwLock;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use crate::assurance::models::{IntentResponse, NetworkDevice, TokenResponse};
use crate::error::Error;
use crate::transport::{self, TransportConfig};

const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Raw HTTP client for a campus assurance controller.
pub struct AssuranceClient {
    http: reqwest::Client,
    base_url: Url,
    transport: TransportConfig,
    token: RwLock<Option<SecretString>>,
}

impl AssuranceClient {
    /// Create a client for the controller at `base_url`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            transport: transport.clone(),
            token: RwLock::new(None),
        })
    }

    /// The controller base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Exchange basic credentials for a bearer token.
    ///
    /// `POST /dna/system/api/v1/auth/token`
    pub async fn authenticate(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<(), Error> {
        let url = transport::endpoint(&self.base_url, "dna/system/api/v1/auth/token")?;
        debug!("requesting token at {}", url);

        let resp = self
            .http
            .post(url)
            .basic_auth(username, Some(password.expose_secret()))
            .send()
            .await
            .map_err(|e| self.transport.send_error(e))?;

        let reply: TokenResponse = transport::read_json(resp).await.map_err(|e| match e {
            Error::Deserialization { message, .. } => Error::Authentication {
                message: format!("token reply not understood: {message}"),
            },
            other => other,
        })?;

        if let Ok(mut guard) = self.token.write() {
            *guard = Some(SecretString::from(reply.token));
        }
        debug!("token acquired");
        Ok(())
    }

    /// List every network device known to the controller.
    ///
    /// `GET /dna/intent/api/v1/network-device`
    pub async fn list_network_devices(&self) -> Result<Vec<NetworkDevice>, Error> {
        let url = transport::endpoint(&self.base_url, "dna/intent/api/v1/network-device")?;
        let token = self.token_value()?;
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .header(AUTH_TOKEN_HEADER, token)
            .send()
            .await
            .map_err(|e| self.transport.send_error(e))?;

        let reply: IntentResponse<NetworkDevice> = transport::read_json(resp).await?;
        Ok(reply.response)
    }

    fn token_value(&self) -> Result<String, Error> {
        let guard = self.token.read().map_err(|_| Error::Authentication {
            message: "token lock poisoned".into(),
        })?;
        guard
            .as_ref()
            .map(|t| t.expose_secret().to_owned())
            .ok_or_else(|| Error::Authentication {
                message: "no token acquired".into(),
            })
    }
}
