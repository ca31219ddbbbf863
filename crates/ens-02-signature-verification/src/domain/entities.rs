//! # Domain Entities
//!
//! The values that flow through one verification: the compact signature,
//! the decoded gateway answer and the verified outcome.

use super::errors::SignatureError;
use serde::{Deserialize, Serialize};
use shared_types::{abi, Address, Bytes, Timestamp};

// =============================================================================
// ECDSA SIGNATURE (secp256k1, 65 bytes)
// =============================================================================

/// ECDSA signature on the secp256k1 curve, in Ethereum's `r ‖ s ‖ v` layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcdsaSignature {
    /// R component (32 bytes)
    pub r: [u8; 32],
    /// S component (32 bytes)
    pub s: [u8; 32],
    /// Recovery ID (0, 1, 27, or 28)
    pub v: u8,
}

impl EcdsaSignature {
    /// Encoded length of a compact signature.
    pub const LEN: usize = 65;

    /// Split a 65-byte `r ‖ s ‖ v` signature.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignatureError> {
        if bytes.len() != Self::LEN {
            return Err(SignatureError::InvalidLength(bytes.len()));
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Ok(Self { r, s, v: bytes[64] })
    }

    /// Join back into the 65-byte wire layout.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }
}

// =============================================================================
// GATEWAY RESPONSE
// =============================================================================

/// A gateway answer: the ABI-decoded return value of `IResolverService.resolve`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedResponse {
    /// Result bytes handed back to the resolving client.
    pub result: Bytes,
    /// Unix time after which the answer must be rejected.
    pub expires: Timestamp,
    /// Raw signature bytes, expected to be 65 long.
    pub signature: Bytes,
}

impl SignedResponse {
    /// Decode the ABI tuple `(bytes result, uint64 expires, bytes sig)`.
    pub fn decode(response: &[u8]) -> Result<Self, SignatureError> {
        let (result, expires, signature) = abi::decode_signed_response(response)
            .map_err(|e| SignatureError::MalformedResponse(e.to_string()))?;
        Ok(Self {
            result,
            expires,
            signature,
        })
    }

    /// Encode back into the ABI tuple a gateway would send.
    #[cfg(any(test, feature = "test-utils"))]
    #[must_use]
    pub fn encode(&self) -> Bytes {
        abi::encode_signed_response(
            self.result.as_slice(),
            self.expires,
            self.signature.as_slice(),
        )
    }
}

/// Outcome of a successful verification. No registry check has happened yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifiedResponse {
    /// The address that produced the signature.
    pub signer: Address,
    /// The signed result, unchanged.
    pub result: Bytes,
}
