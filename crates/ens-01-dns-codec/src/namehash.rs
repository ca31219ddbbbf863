use shared_types::{keccak256, Hash};

/// Compute the ENS namehash of a dotted name.
///
/// `namehash("") = 0x00..00` and
/// `namehash(label.rest) = keccak256(namehash(rest) ‖ keccak256(label))`.
/// Empty labels are skipped, matching [`crate::encode`].
#[must_use]
pub fn namehash(name: &str) -> Hash {
    let mut node = Hash::ZERO;

    for label in name.rsplit('.').filter(|l| !l.is_empty()) {
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(node.as_bytes());
        buf[32..].copy_from_slice(keccak256(label.as_bytes()).as_bytes());
        node = keccak256(&buf);
    }

    node
}
