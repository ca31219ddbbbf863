//! # Signature Verification (ENS-02)
//!
//! Authenticates CCIP-Read gateway responses.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): digest construction and secp256k1 recovery, no I/O
//! - **Ports Layer** (`ports/`): the `ResponseVerifier` trait the resolver depends on
//! - **Service Layer** (`service.rs`): `SignatureVerifier`, wiring domain to port
//!
//! ## Security Notes
//!
//! - **Replay Binding**: the digest commits to the resolver address, so an
//!   answer signed for one contract never verifies for another
//! - **Expiry First**: stale answers are rejected before any cryptography runs
//! - **Malleability Prevention (EIP-2)**: signatures with high S values are rejected
//! - **No Trust Decision**: verification returns the signer; registry
//!   membership is checked by the caller

pub mod domain;
pub mod ports;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export public API
pub use domain::digest::{signature_hash, EIP191_PREFIX};
pub use domain::ecdsa::{address_from_pubkey, recover_signer};
pub use domain::entities::{EcdsaSignature, SignedResponse, VerifiedResponse};
pub use domain::errors::SignatureError;
pub use ports::inbound::ResponseVerifier;
pub use service::SignatureVerifier;

#[cfg(any(test, feature = "test-utils"))]
pub use test_utils::TestSigner;
