//! # Ports Layer
//!
//! Trait definitions for the verification API.

pub mod inbound;
