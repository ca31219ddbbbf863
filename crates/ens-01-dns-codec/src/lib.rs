//! # DNS Name Codec
//!
//! Pure, stateless transforms between human-readable ENS names and the byte
//! layouts the resolver protocol consumes.
//!
//! - [`encode`] / [`decode`]: DNS wire format (length-prefixed labels,
//!   terminated by a zero byte) as used by ENSIP-10 `resolve(name, data)`.
//! - [`namehash`]: the recursive ENS node hash used by inner resolution calls
//!   such as `addr(bytes32)`.
//!
//! Empty labels are dropped, so `"test.eth"`, `".test.eth"`, `"test.eth."`
//! and `"..test.eth..."` all map to the same wire bytes.

mod errors;
mod namehash;
mod wire;

pub use errors::DnsError;
pub use namehash::namehash;
pub use wire::{decode, encode, MAX_LABEL_LEN};
