//! # Adapters Layer
//!
//! - `host`: in-memory chain executing resolver code
//! - `http`: reqwest gateway transport (feature `http`)

pub mod host;
#[cfg(feature = "http")]
pub mod http;

pub use host::Host;
#[cfg(feature = "http")]
pub use http::HttpGatewayTransport;
