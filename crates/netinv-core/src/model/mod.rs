// ── Inventory domain model ──

pub mod domain;
pub mod record;
pub mod summary;

pub use domain::{Domain, DomainTag};
pub use record::{DeviceInfo, DeviceRecord, RecordBody, status};
pub use summary::{ControllerCount, Summary};
