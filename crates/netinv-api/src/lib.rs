// netinv-api: Async Rust clients for multi-domain controller inventory APIs

pub mod assurance;
pub mod cloud_access;
pub mod error;
pub mod fabric;
pub mod transport;
pub mod wan_overlay;

pub use assurance::AssuranceClient;
pub use cloud_access::CloudAccessClient;
pub use error::Error;
pub use fabric::FabricClient;
pub use transport::{TlsMode, TransportConfig};
pub use wan_overlay::WanOverlayClient;
