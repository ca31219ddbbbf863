//! # Signature Verification Service
//!
//! Application service implementing the `ResponseVerifier` port by delegating
//! to the domain layer.

use crate::domain::digest;
use crate::domain::ecdsa;
use crate::domain::entities::{EcdsaSignature, SignedResponse, VerifiedResponse};
use crate::domain::errors::SignatureError;
use crate::ports::inbound::ResponseVerifier;
use shared_types::{Address, Hash, Timestamp};
use tracing::debug;

/// Stateless verifier for signed gateway responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureVerifier;

impl SignatureVerifier {
    /// Create a new verifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ResponseVerifier for SignatureVerifier {
    fn make_signature_hash(
        &self,
        target: Address,
        expires: Timestamp,
        request: &[u8],
        result: &[u8],
    ) -> Hash {
        digest::signature_hash(target, expires, request, result)
    }

    fn recover_signer(
        &self,
        digest: &Hash,
        signature: &EcdsaSignature,
    ) -> Result<Address, SignatureError> {
        ecdsa::recover_signer(digest, signature)
    }

    fn verify(
        &self,
        target: Address,
        request: &[u8],
        response: &[u8],
        now: Timestamp,
    ) -> Result<VerifiedResponse, SignatureError> {
        let decoded = SignedResponse::decode(response)?;

        if decoded.expires <= now {
            debug!(expires = decoded.expires, now, "gateway response expired");
            return Err(SignatureError::Expired {
                expires: decoded.expires,
                now,
            });
        }

        let hash = self.make_signature_hash(
            target,
            decoded.expires,
            request,
            decoded.result.as_slice(),
        );
        let signature = EcdsaSignature::from_bytes(decoded.signature.as_slice())?;
        let signer = self.recover_signer(&hash, &signature)?;

        debug!(%signer, %target, expires = decoded.expires, "gateway response verified");

        Ok(VerifiedResponse {
            signer,
            result: decoded.result,
        })
    }
}
