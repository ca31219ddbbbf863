//! # Ports Layer
//!
//! - `inbound`: the resolution API this crate offers
//! - `outbound`: the gateway transport it depends on

pub mod inbound;
pub mod outbound;
