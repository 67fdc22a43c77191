// WAN-overlay manager client modules
//
// Form-based session login; the session cookie in the client's jar
// authenticates the data service calls.

pub mod client;
pub mod models;

pub use client::WanOverlayClient;
