//! # Signature Errors
//!
//! Error types for gateway response verification.

use shared_types::Timestamp;
use thiserror::Error;

/// Errors that can occur while verifying a signed gateway response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The signature is not exactly 65 bytes (`r ‖ s ‖ v`).
    #[error("Invalid signature length: expected 65 bytes, got {0}")]
    InvalidLength(usize),

    /// `r` or `s` is zero or not below the curve order.
    #[error("Invalid signature format")]
    InvalidFormat,

    /// Invalid recovery ID (v must be 0, 1, 27, or 28)
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// Signature has high S value (EIP-2 malleability protection)
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// Failed to recover public key from signature
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// Recovery produced the zero address.
    #[error("Recovered signer is the zero address")]
    ZeroAddress,

    /// The response's `expires` is not after the current time.
    #[error("Signature expired at {expires} (now {now})")]
    Expired { expires: Timestamp, now: Timestamp },

    /// The response is not an ABI-encoded `(bytes, uint64, bytes)` tuple.
    #[error("Malformed gateway response: {0}")]
    MalformedResponse(String),
}
