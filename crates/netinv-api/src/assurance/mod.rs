// Campus assurance controller client modules
//
// Basic credentials are exchanged for a token at a dedicated auth endpoint;
// the token is sent as `X-Auth-Token` on intent API calls.

pub mod client;
pub mod models;

pub use client::AssuranceClient;
