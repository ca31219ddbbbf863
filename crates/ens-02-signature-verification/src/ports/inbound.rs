//! # Inbound Ports (Driving Ports / API)
//!
//! The verification API the resolver contract depends on.

use crate::domain::entities::{EcdsaSignature, VerifiedResponse};
use crate::domain::errors::SignatureError;
use shared_types::{Address, Hash, Timestamp};

/// Gateway response verification API.
///
/// Implementations must be stateless and thread-safe (`Send + Sync`). No
/// registry check happens here; deciding whether the signer is trusted is
/// the caller's job.
pub trait ResponseVerifier: Send + Sync {
    /// Digest a gateway signs for `(target, expires, request, result)`.
    fn make_signature_hash(
        &self,
        target: Address,
        expires: Timestamp,
        request: &[u8],
        result: &[u8],
    ) -> Hash;

    /// Recover the signer's address from a digest.
    ///
    /// # Security
    /// - Rejects signatures with high S values (EIP-2 malleability protection)
    /// - Rejects recoveries yielding the zero address
    fn recover_signer(
        &self,
        digest: &Hash,
        signature: &EcdsaSignature,
    ) -> Result<Address, SignatureError>;

    /// Decode, check expiry and recover the signer of a gateway response.
    ///
    /// # Errors
    /// * `MalformedResponse` - `response` is not the ABI tuple
    /// * `Expired` - `expires <= now`, checked before any cryptography
    /// * any signature error from recovery
    fn verify(
        &self,
        target: Address,
        request: &[u8],
        response: &[u8],
        now: Timestamp,
    ) -> Result<VerifiedResponse, SignatureError>;
}
