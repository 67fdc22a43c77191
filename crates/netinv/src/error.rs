//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use netinv_config::ConfigError;
use netinv_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFLICT: i32 = 6;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Usage ────────────────────────────────────────────────────────
    #[error("'{keyword}' is not a supported domain")]
    #[diagnostic(
        code(netinv::unsupported_domain),
        help("Available options: {available}")
    )]
    UnsupportedDomain { keyword: String, available: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Registry file already exists at {path}")]
    #[diagnostic(
        code(netinv::registry_exists),
        help("Edit the existing file, or pass --registry to write somewhere else.")
    )]
    RegistryExists { path: String },

    #[error(transparent)]
    #[diagnostic(code(netinv::config))]
    Config(ConfigError),

    // ── Inventory ────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(netinv::inventory))]
    Inventory { message: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {message}")]
    #[diagnostic(code(netinv::render))]
    Render { message: String },
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UnsupportedDomain { .. } => exit_code::USAGE,
            Self::RegistryExists { .. } => exit_code::CONFLICT,
            _ => exit_code::GENERAL,
        }
    }
}

// ── Library error mapping ────────────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::DomainUnresolved { keyword, available } => {
                CliError::UnsupportedDomain { keyword, available }
            }
            other => CliError::Inventory {
                message: other.to_string(),
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::AlreadyExists { path } => CliError::RegistryExists {
                path: path.display().to_string(),
            },
            other => CliError::Config(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Render {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Render {
            message: err.to_string(),
        }
    }
}
