// ── Core error types ──
//
// Inventory-level failure taxonomy. Consumers never see raw HTTP status
// codes or JSON parse failures directly; the `From<netinv_api::Error>` impl
// folds transport-layer errors into auth, network, and response-shape
// categories. Site-level variants end up as text inside error records.

use thiserror::Error;

use crate::model::Domain;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration errors ─────────────────────────────────────────
    /// A site lacks a required field; it is excluded, never reported as a record.
    #[error("{domain} site '{site}' is missing required field '{field}'")]
    ConfigMissing {
        domain: Domain,
        site: String,
        field: &'static str,
    },

    #[error("Registry source {path} unusable: {reason}")]
    RegistrySource { path: String, reason: String },

    // ── Site errors ──────────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    AuthFailure { message: String },

    #[error("Cannot reach controller: {reason}")]
    NetworkFailure { reason: String },

    #[error("Controller request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Unexpected controller response: {message}")]
    ResponseShape { message: String },

    // ── Consumer boundary ────────────────────────────────────────────
    #[error("'{keyword}' is not a supported domain. Available options: {available}")]
    DomainUnresolved { keyword: String, available: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<netinv_api::Error> for CoreError {
    fn from(err: netinv_api::Error) -> Self {
        use netinv_api::Error as Api;

        if let Api::Timeout { timeout_secs } = err {
            return CoreError::Timeout { timeout_secs };
        }
        if err.is_timeout() {
            return CoreError::Timeout { timeout_secs: 0 };
        }
        if err.is_auth() {
            let message = match err {
                Api::Authentication { message } => message,
                other => other.to_string(),
            };
            return CoreError::AuthFailure { message };
        }
        if err.is_response_shape() {
            let message = match err {
                Api::Deserialization { message, body: _ } => message,
                other => other.to_string(),
            };
            return CoreError::ResponseShape { message };
        }
        if err.is_network() {
            return CoreError::NetworkFailure {
                reason: err.to_string(),
            };
        }

        match err {
            Api::Api { status, message } => CoreError::ResponseShape {
                message: format!("HTTP {status}: {message}"),
            },
            Api::InvalidUrl(e) => CoreError::NetworkFailure {
                reason: format!("invalid controller address: {e}"),
            },
            other => CoreError::NetworkFailure {
                reason: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_auth_maps_to_auth_failure() {
        let err = CoreError::from(netinv_api::Error::Authentication {
            message: "nope".into(),
        });
        assert!(matches!(err, CoreError::AuthFailure { .. }));
    }

    #[test]
    fn forbidden_status_maps_to_auth_failure() {
        let err = CoreError::from(netinv_api::Error::Api {
            status: 403,
            message: "forbidden".into(),
        });
        assert!(matches!(err, CoreError::AuthFailure { .. }));
    }

    #[test]
    fn server_error_maps_to_response_shape() {
        let err = CoreError::from(netinv_api::Error::Api {
            status: 500,
            message: "oops".into(),
        });
        assert_eq!(err.to_string(), "Unexpected controller response: HTTP 500: oops");
    }

    #[test]
    fn tls_failure_maps_to_network_failure() {
        let err = CoreError::from(netinv_api::Error::Tls("bad certificate".into()));
        assert!(matches!(err, CoreError::NetworkFailure { .. }));
        assert!(err.to_string().contains("bad certificate"));
    }

    #[test]
    fn api_timeout_keeps_budget() {
        let err = CoreError::from(netinv_api::Error::Timeout { timeout_secs: 15 });
        assert_eq!(err.to_string(), "Controller request timed out after 15s");
    }

    #[test]
    fn deserialization_maps_to_response_shape() {
        let err = CoreError::from(netinv_api::Error::Deserialization {
            message: "missing field `data`".into(),
            body: "{}".into(),
        });
        assert!(matches!(err, CoreError::ResponseShape { .. }));
    }

    #[test]
    fn unresolved_domain_lists_options() {
        let err = CoreError::DomainUnresolved {
            keyword: "firewall".into(),
            available: "fabric, cloud".into(),
        };
        assert!(err.to_string().contains("not a supported domain"));
    }
}
