//! Site registry configuration for netinv.
//!
//! TOML registry file plus environment overrides (figment), credential
//! indirection through environment variables, and translation into
//! `netinv_core::SiteRegistry` / `CollectorConfig`. Loading is fail-soft:
//! a missing or malformed registry degrades to an empty one.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use netinv_core::{CollectorConfig, CoreError, Domain, SiteDescriptor, SiteRegistry};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("registry file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("registry file already exists: {}", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("failed to serialize registry: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("registry loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level registry file: defaults plus one site list per domain.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default, rename = "fabric-controller")]
    pub fabric_controller: Vec<SiteEntry>,

    #[serde(default, rename = "cloud-access-controller")]
    pub cloud_access_controller: Vec<SiteEntry>,

    #[serde(default, rename = "assurance-controller")]
    pub assurance_controller: Vec<SiteEntry>,

    #[serde(default, rename = "wan-overlay-controller")]
    pub wan_overlay_controller: Vec<SiteEntry>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    /// Per-HTTP-call timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,

    /// Accept self-signed certificates unless a site says otherwise.
    #[serde(default = "default_insecure")]
    pub insecure: bool,

    /// Cap on concurrently fetched sites per domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_site_concurrency: Option<usize>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            cache_ttl_secs: default_cache_ttl(),
            insecure: default_insecure(),
            max_site_concurrency: None,
        }
    }
}

fn default_timeout() -> u64 {
    15
}
fn default_cache_ttl() -> u64 {
    300
}
fn default_insecure() -> bool {
    true
}

/// One controller site as written in the registry.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct SiteEntry {
    /// Display name, reported as `controller` on every record.
    pub name: Option<String>,

    /// Controller host or base URL.
    #[serde(alias = "host", alias = "url")]
    pub address: Option<String>,

    pub username: Option<String>,

    /// Password (plaintext; prefer `password_env`).
    pub password: Option<String>,

    /// Environment variable holding the password.
    pub password_env: Option<String>,

    /// API key (plaintext; prefer `api_key_env`).
    pub api_key: Option<String>,

    /// Environment variable holding the API key.
    pub api_key_env: Option<String>,

    pub org_id: Option<String>,

    /// Outbound proxy URL for this site's traffic.
    pub proxy: Option<String>,

    /// Override the registry-wide TLS default.
    pub insecure: Option<bool>,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,
}

impl SiteEntry {
    /// Build a descriptor, resolving `*_env` indirections with `lookup`.
    ///
    /// An env reference wins over the plaintext field when the variable is
    /// set; when it is unset the plaintext field (if any) is used.
    pub fn to_descriptor_with(&self, lookup: &dyn Fn(&str) -> Option<String>) -> SiteDescriptor {
        SiteDescriptor {
            name: self.name.clone(),
            address: self.address.clone(),
            username: self.username.clone(),
            password: resolve_secret(self.password_env.as_deref(), self.password.as_deref(), lookup),
            api_key: resolve_secret(self.api_key_env.as_deref(), self.api_key.as_deref(), lookup),
            org_id: self.org_id.clone(),
            proxy: self.proxy.clone(),
            insecure: self.insecure,
            ca_cert: self.ca_cert.clone(),
        }
    }

    /// Build a descriptor against the process environment.
    pub fn to_descriptor(&self) -> SiteDescriptor {
        self.to_descriptor_with(&|name| std::env::var(name).ok())
    }
}

fn resolve_secret(
    env_name: Option<&str>,
    plaintext: Option<&str>,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Option<SecretString> {
    if let Some(name) = env_name {
        if let Some(value) = lookup(name).filter(|v| !v.is_empty()) {
            return Some(SecretString::from(value));
        }
        debug!(env = name, "credential variable unset");
    }
    plaintext
        .filter(|v| !v.is_empty())
        .map(|v| SecretString::from(v.to_owned()))
}

impl Config {
    /// Site entries of one domain, in file order.
    pub fn sites(&self, domain: Domain) -> &[SiteEntry] {
        match domain {
            Domain::FabricController => &self.fabric_controller,
            Domain::CloudAccessController => &self.cloud_access_controller,
            Domain::AssuranceController => &self.assurance_controller,
            Domain::WanOverlayController => &self.wan_overlay_controller,
        }
    }

    /// Translate into a core registry, resolving credentials with `lookup`.
    pub fn to_registry_with(&self, lookup: &dyn Fn(&str) -> Option<String>) -> SiteRegistry {
        let mut registry = SiteRegistry::new(self.defaults.insecure);
        for domain in Domain::all() {
            for entry in self.sites(domain) {
                registry.add(domain, entry.to_descriptor_with(lookup));
            }
        }
        registry
    }

    /// Translate into a core registry against the process environment.
    pub fn to_registry(&self) -> SiteRegistry {
        self.to_registry_with(&|name| std::env::var(name).ok())
    }

    pub fn collector_config(&self) -> CollectorConfig {
        collector_config(&self.defaults)
    }
}

/// Collector tuning from the `[defaults]` table.
pub fn collector_config(defaults: &Defaults) -> CollectorConfig {
    CollectorConfig {
        timeout: Duration::from_secs(defaults.timeout_secs.max(1)),
        cache_ttl: Duration::from_secs(defaults.cache_ttl_secs),
        insecure: defaults.insecure,
        max_site_concurrency: defaults.max_site_concurrency,
    }
}

// ── Registry file path ──────────────────────────────────────────────

/// Resolve the registry path via XDG / platform conventions.
pub fn registry_path() -> PathBuf {
    ProjectDirs::from("net", "netinv", "netinv").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("registry.toml");
            p
        },
        |dirs| dirs.config_dir().join("registry.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("netinv");
    p
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load the registry file at `path` merged with `NETINV_DEFAULTS__*` overrides.
///
/// Fails if the file is absent or does not match the expected shape.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(
            Env::prefixed("NETINV_")
                .filter(|key| {
                    key.as_str()
                        .get(..10)
                        .is_some_and(|p| p.eq_ignore_ascii_case("defaults__"))
                })
                .split("__"),
        );

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, degrading to an empty default on any failure.
pub fn load_config_or_default(path: &Path) -> Config {
    match load_config(path) {
        Ok(config) => config,
        Err(e) => {
            let err = registry_source_error(path, &e);
            warn!(error = %err, "no sites configured");
            Config::default()
        }
    }
}

/// Report a failed registry load as an inventory-level error.
pub fn registry_source_error(path: &Path, err: &ConfigError) -> CoreError {
    CoreError::RegistrySource {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Load the site registry and collector tuning from `path`. Never fails.
pub fn load_registry(path: &Path) -> (SiteRegistry, CollectorConfig) {
    let config = load_config_or_default(path);
    (config.to_registry(), config.collector_config())
}

// ── Saving ──────────────────────────────────────────────────────────

/// Write `config` as TOML to `path`, refusing to overwrite an existing file.
pub fn save_new_config(path: &Path, config: &Config) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(config)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Starter registry with one example site per domain.
pub fn starter_config() -> Config {
    let example = |name: &str, address: &str, env: &str| SiteEntry {
        name: Some(name.into()),
        address: Some(address.into()),
        username: Some("admin".into()),
        password_env: Some(env.into()),
        ..SiteEntry::default()
    };
    Config {
        defaults: Defaults::default(),
        fabric_controller: vec![example("DC1-Fabric", "apic1.example.net", "DC1_FABRIC_PASSWORD")],
        cloud_access_controller: vec![SiteEntry {
            name: Some("Corp-Org".into()),
            api_key_env: Some("CORP_DASHBOARD_KEY".into()),
            org_id: Some("123456".into()),
            ..SiteEntry::default()
        }],
        assurance_controller: vec![example("Campus", "dnac.example.net", "CAMPUS_PASSWORD")],
        wan_overlay_controller: vec![example(
            "SD-WAN",
            "vmanage.example.net:8443",
            "SDWAN_PASSWORD",
        )],
    }
}
