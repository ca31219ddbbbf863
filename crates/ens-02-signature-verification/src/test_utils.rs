//! # Test Signers
//!
//! Gateway-side signing helpers for tests and fixtures. Available to other
//! crates through the `test-utils` feature.

use crate::domain::digest::signature_hash;
use crate::domain::ecdsa::address_from_pubkey;
use crate::domain::entities::{EcdsaSignature, SignedResponse};
use k256::ecdsa::{RecoveryId, SigningKey};
use shared_types::{keccak256, Address, Bytes, Hash, Timestamp};

/// A secp256k1 key that signs the way a gateway does.
#[derive(Clone)]
pub struct TestSigner {
    key: SigningKey,
    address: Address,
}

impl std::fmt::Debug for TestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl TestSigner {
    /// Deterministic signer derived from `seed`.
    ///
    /// # Panics
    /// Never in practice: the derived secret is a keccak output.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        let mut preimage = b"ens-test-signer".to_vec();
        preimage.extend_from_slice(&seed.to_be_bytes());
        let secret = keccak256(&preimage);
        let key = SigningKey::from_slice(secret.as_bytes()).expect("valid secret scalar");
        Self::from_key(key)
    }

    /// Fresh random signer.
    #[must_use]
    pub fn random() -> Self {
        Self::from_key(SigningKey::random(&mut rand::thread_rng()))
    }

    fn from_key(key: SigningKey) -> Self {
        let address = address_from_pubkey(key.verifying_key());
        Self { key, address }
    }

    /// The signer's address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign a prehashed digest with a low-S signature and `v` in {27, 28}.
    ///
    /// # Panics
    /// If k256 fails to sign, which only happens for a zero digest scalar.
    #[must_use]
    pub fn sign_digest(&self, digest: &Hash) -> EcdsaSignature {
        let (sig, recid) = self
            .key
            .sign_prehash_recoverable(digest.as_bytes())
            .expect("signing failed");

        // Normalize S to low value (EIP-2), flipping the y parity with it
        let (sig, recid) = match sig.normalize_s() {
            Some(low) => (low, RecoveryId::new(!recid.is_y_odd(), recid.is_x_reduced())),
            None => (sig, recid),
        };

        let bytes = sig.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);

        EcdsaSignature {
            r,
            s,
            v: recid.to_byte() + 27,
        }
    }

    /// Build the ABI-encoded response a gateway returns for `request`.
    #[must_use]
    pub fn sign_response(
        &self,
        target: Address,
        request: &[u8],
        result: &[u8],
        expires: Timestamp,
    ) -> Bytes {
        let digest = signature_hash(target, expires, request, result);
        SignedResponse {
            result: Bytes::from_slice(result),
            expires,
            signature: Bytes::from_slice(&self.sign_digest(&digest).to_bytes()),
        }
        .encode()
    }
}
