// Cloud-managed access controller client modules
//
// Stateless REST API authenticated by a static API key header,
// scoped to one organization.

pub mod client;
pub mod models;

pub use client::{CloudAccessClient, DEFAULT_BASE_URL};
