// Fabric controller HTTP client
//
// Token login via `aaaLogin.json`, then class queries authenticated by the
// `APIC-cookie` header carrying that token.

use std::sync::RwLock;

use reqwest::header::COOKIE;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::fabric::models::{FabricNode, FabricNodeObject, ImData, LoginObject};
use crate::transport::{self, TransportConfig};

/// Raw HTTP client for a fabric controller.
///
/// Holds the session token captured by [`login`](Self::login); every query
/// sends it back as the `APIC-cookie` cookie.
pub struct FabricClient {
    http: reqwest::Client,
    base_url: Url,
    transport: TransportConfig,
    token: RwLock<Option<SecretString>>,
}

impl FabricClient {
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

    /// Exchange username/password for a session token.
    ///
    /// `POST /api/aaaLogin.json`
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        let url = transport::endpoint(&self.base_url, "api/aaaLogin.json")?;
        debug!("logging in at {}", url);

        let body = json!({
            "aaaUser": {
                "attributes": {
                    "name": username,
                    "pwd": password.expose_secret(),
                }
            }
        });

        let resp = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport.send_error(e))?;

        let reply: ImData<LoginObject> = transport::read_json(resp).await?;
        let token = reply
            .imdata
            .into_iter()
            .next()
            .map(|obj| obj.aaa_login.attributes.token)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Authentication {
                message: "login reply did not contain a session token".into(),
            })?;

        self.set_token(SecretString::from(token));
        debug!("login successful");
        Ok(())
    }

    /// List every fabric member node.
    ///
    /// `GET /api/node/class/fabricNode.json`
    pub async fn list_nodes(&self) -> Result<Vec<FabricNode>, Error> {
        let url = transport::endpoint(&self.base_url, "api/node/class/fabricNode.json")?;
        let cookie = self.cookie_header()?;
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .header(COOKIE, cookie)
            .send()
            .await
            .map_err(|e| self.transport.send_error(e))?;

        let reply: ImData<FabricNodeObject> = transport::read_json(resp).await?;
        Ok(reply
            .imdata
            .into_iter()
            .map(|obj| obj.fabric_node.attributes)
            .collect())
    }

    // ── Token management ─────────────────────────────────────────────

    fn set_token(&self, token: SecretString) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token);
        }
    }

    fn cookie_header(&self) -> Result<String, Error> {
        let guard = self.token.read().map_err(|_| Error::Authentication {
            message: "session token lock poisoned".into(),
        })?;
        guard
            .as_ref()
            .map(|t| format!("APIC-cookie={}", t.expose_secret()))
            .ok_or_else(|| Error::Authentication {
                message: "not logged in".into(),
            })
    }
}
