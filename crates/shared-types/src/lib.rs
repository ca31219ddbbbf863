//! # Shared Types Crate
//!
//! Value objects and ABI definitions shared by every crate in the workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Address`, `Hash`, `Bytes` and `Selector` are
//!   defined once here; the signature, resolver and client crates never use raw
//!   arrays at their public boundaries.
//! - **Wire Compatibility**: all Solidity-facing encodings go through the
//!   `abi` module so that the digest the resolver checks and the payload a
//!   gateway signs are built from the same definitions.

pub mod abi;
pub mod errors;
pub mod primitives;

pub use errors::ParseError;
pub use primitives::*;
