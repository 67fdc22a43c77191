// netinv-core: Concurrent fetch-normalize-aggregate engine between netinv-api and consumers.

pub mod adapter;
pub mod cache;
pub mod collector;
pub mod config;
pub mod convert;
pub mod error;
pub mod inventory;
pub mod model;
pub mod query;
pub mod registry;

// ── Primary re-exports ──────────────────────────────────────────────
pub use cache::{CacheEntry, InventoryCache};
pub use collector::{Collector, InventorySource, SiteOutcome};
pub use config::{CollectorConfig, Credentials, SiteConfig, SiteDescriptor, TlsVerification};
pub use error::CoreError;
pub use inventory::Inventory;
pub use registry::SiteRegistry;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    ControllerCount, DeviceInfo, DeviceRecord, Domain, DomainTag, RecordBody, Summary, status,
};
