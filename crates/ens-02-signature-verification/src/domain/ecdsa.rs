//! # ECDSA Recovery (secp256k1)
//!
//! Pure domain logic for recovering the signer of a gateway response.
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: signatures with high S values are rejected
//! - **Scalar Range Validation**: R and S must be in [1, n-1]
//! - **Zero Address**: a recovery that yields the zero address is an error,
//!   never a signer

use super::entities::EcdsaSignature;
use super::errors::SignatureError;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use shared_types::{keccak256, Address, Hash};

/// Recover the signer's address from a prehashed message.
///
/// Validations performed:
/// 1. R and S are in range [1, n-1]
/// 2. S is in the lower half of the curve order (EIP-2)
/// 3. Recovery ID (v) is 0, 1, 27 or 28
/// 4. Public key recovery succeeds and does not map to the zero address
pub fn recover_signer(digest: &Hash, signature: &EcdsaSignature) -> Result<Address, SignatureError> {
    let recovery_id = parse_recovery_id(signature.v)?;

    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(&signature.r);
    sig_bytes[32..].copy_from_slice(&signature.s);

    let sig = Signature::from_slice(&sig_bytes).map_err(|_| SignatureError::InvalidFormat)?;

    // normalize_s only returns a value when S was in the upper half
    if sig.normalize_s().is_some() {
        return Err(SignatureError::MalleableSignature);
    }

    let key = VerifyingKey::recover_from_prehash(digest.as_bytes(), &sig, recovery_id)
        .map_err(|_| SignatureError::RecoveryFailed)?;

    let address = address_from_pubkey(&key);
    if address.is_zero() {
        return Err(SignatureError::ZeroAddress);
    }
    Ok(address)
}

/// Derive Ethereum address from public key.
#[must_use]
pub fn address_from_pubkey(public_key: &VerifyingKey) -> Address {
    let encoded = public_key.to_encoded_point(false);

    // Keccak256 hash of public key (without 0x04 prefix)
    let hash = keccak256(&encoded.as_bytes()[1..]);

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash.as_bytes()[12..]);
    Address::new(address)
}

/// Parse recovery ID from v value.
///
/// Valid v values: 0, 1, 27, 28
fn parse_recovery_id(v: u8) -> Result<RecoveryId, SignatureError> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(SignatureError::InvalidRecoveryId(v)),
    };

    RecoveryId::try_from(id).map_err(|_| SignatureError::InvalidRecoveryId(v))
}

// =============================================================================
// UNIT TESTS
// =============================================================================
