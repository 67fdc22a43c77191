// Fabric controller client modules
//
// Data-center fabric controller: token login, then managed-object class
// queries wrapped in the `{ imdata: [...] }` envelope.

pub mod client;
pub mod models;

pub use client::FabricClient;
