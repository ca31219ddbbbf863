//! # Response Digest
//!
//! The message a gateway signs:
//!
//! ```text
//! keccak256(0x19 0x00 ‖ target ‖ expires ‖ keccak256(request) ‖ keccak256(result))
//! ```
//!
//! `target` (20 bytes) binds the answer to one resolver contract, `expires`
//! is an 8-byte big-endian integer and the `0x19 0x00` prefix is the EIP-191
//! "data with intended validator" tag.

use sha3::{Digest, Keccak256};
use shared_types::{keccak256, Address, Hash, Timestamp};

/// EIP-191 version `0x00` prefix.
pub const EIP191_PREFIX: [u8; 2] = [0x19, 0x00];

/// Compute the digest a gateway signs for `(target, expires, request, result)`.
#[must_use]
pub fn signature_hash(target: Address, expires: Timestamp, request: &[u8], result: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(EIP191_PREFIX);
    hasher.update(target.as_bytes());
    hasher.update(expires.to_be_bytes());
    hasher.update(keccak256(request).as_bytes());
    hasher.update(keccak256(result).as_bytes());
    let out = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&out);
    Hash::new(hash)
}
