// Shared transport configuration for building reqwest::Client instances.
//
// All four controller clients share TLS, timeout, proxy, and cookie
// settings through this module, avoiding duplicated builder logic.
// The response helpers here unwrap status codes and JSON bodies the
// same way for every controller family.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use tracing::trace;

use crate::error::Error;

/// Default per-call timeout applied to every controller request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// TLS verification mode (api-level mirror of core's TlsVerification).
#[derive(Debug, Clone)]
pub enum TlsMode {
    /// Use the system certificate store.
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (for self-signed on-prem controllers).
    DangerAcceptInvalid,
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
    /// Outbound proxy applied to both HTTP and HTTPS traffic.
    pub proxy: Option<String>,
    pub cookie_jar: Option<Arc<Jar>>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::DangerAcceptInvalid,
            timeout: DEFAULT_TIMEOUT,
            proxy: None,
            cookie_jar: None,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        self.build_client_with_headers(HeaderMap::new())
    }

    /// Build a `reqwest::Client` with additional default headers.
    ///
    /// Used by the cloud-access client to inject its API key header.
    pub fn build_client_with_headers(&self, headers: HeaderMap) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("netinv/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers);

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        if let Some(ref proxy_url) = self.proxy {
            let proxy = reqwest::Proxy::all(proxy_url.as_str()).map_err(|e| Error::Proxy {
                url: proxy_url.clone(),
                reason: e.to_string(),
            })?;
            builder = builder.proxy(proxy);
        }

        if let Some(ref jar) = self.cookie_jar {
            builder = builder.cookie_provider(Arc::clone(jar));
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }

    /// Create a config with a fresh cookie jar (for session auth).
    pub fn with_cookie_jar(mut self) -> Self {
        self.cookie_jar = Some(Arc::new(Jar::default()));
        self
    }

    /// Translate a send failure, surfacing timeouts with the configured budget.
    pub(crate) fn send_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            Error::Transport(err)
        }
    }
}

/// Parse a controller base address into a URL.
///
/// Bare hosts (`apic1.example.net`) get an `https://` scheme; full URLs are
/// kept as-is. Trailing slashes are stripped so paths can be appended.
pub fn parse_base_url(raw: &str) -> Result<url::Url, Error> {
    let trimmed = raw.trim().trim_end_matches('/');
    let candidate = if trimmed.contains("://") {
        trimmed.to_owned()
    } else {
        format!("https://{trimmed}")
    };
    Ok(url::Url::parse(&candidate)?)
}

/// Join an absolute API path onto a base URL, preserving any base path prefix.
pub(crate) fn endpoint(base: &url::Url, path: &str) -> Result<url::Url, Error> {
    let root = base.as_str().trim_end_matches('/');
    let path = path.trim_start_matches('/');
    Ok(url::Url::parse(&format!("{root}/{path}"))?)
}

/// Check the status of a response, mapping 401/403 to authentication failures
/// and any other non-success code to `Error::Api` with a body preview.
pub(crate) async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let preview: String = body.chars().take(200).collect();

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(Error::Authentication {
            message: format!("HTTP {status}: {preview}"),
        });
    }

    Err(Error::Api {
        status: status.as_u16(),
        message: preview,
    })
}

/// Check the status, read the body, and decode it as JSON.
pub(crate) async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let resp = check_status(resp).await?;
    let body = resp.text().await.map_err(Error::Transport)?;
    trace!(len = body.len(), "decoding response body");
    decode_json(&body)
}

/// Decode a JSON body, keeping a preview of the payload on failure.
pub(crate) fn decode_json<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.to_owned(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_gets_https_scheme() {
        let url = parse_base_url("apic1.example.net").expect("valid host");
        assert_eq!(url.as_str(), "https://apic1.example.net/");
    }

    #[test]
    fn full_url_is_kept_and_trailing_slash_dropped() {
        let url = parse_base_url("http://10.0.0.5:8443/").expect("valid url");
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.port(), Some(8443));
    }

    #[test]
    fn endpoint_preserves_base_path() {
        let base = parse_base_url("https://api.example.com/api/v1").expect("valid url");
        let url = endpoint(&base, "/organizations/1/devices").expect("valid path");
        assert_eq!(
            url.as_str(),
            "https://api.example.com/api/v1/organizations/1/devices"
        );
    }

    #[test]
    fn invalid_proxy_is_reported() {
        let config = TransportConfig {
            proxy: Some("not a proxy url".into()),
            ..TransportConfig::default()
        };
        let err = config.build_client().expect_err("proxy should be rejected");
        assert!(matches!(err, Error::Proxy { .. }), "got {err:?}");
    }
}
