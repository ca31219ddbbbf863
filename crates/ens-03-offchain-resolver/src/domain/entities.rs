//! # Core Domain Entities

use serde::{Deserialize, Serialize};
use shared_types::{abi, Address, Bytes, Selector, Timestamp};

// =============================================================================
// BLOCK CONTEXT
// =============================================================================

/// Block-level information visible to executing code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockContext {
    /// Block number.
    pub number: u64,
    /// Block timestamp (unix seconds). Expiry is compared against this.
    pub timestamp: Timestamp,
}

// =============================================================================
// OFFCHAIN LOOKUP
// =============================================================================

/// EIP-3668 instruction to fetch an answer from a gateway and call back.
///
/// Returned as a result variant rather than an error; [`Self::abi_encode`]
/// produces the revert data an EVM contract would emit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffchainLookup {
    /// The contract issuing the lookup; clients reject a mismatch.
    pub sender: Address,
    /// Gateway URL templates with `{sender}` / `{data}` placeholders.
    pub urls: Vec<String>,
    /// Payload for the gateway: `IResolverService.resolve(name, data)`.
    pub call_data: Bytes,
    /// Selector of the function to call with the gateway response.
    pub callback: Selector,
    /// Echoed back verbatim as the callback's second argument.
    pub extra_data: Bytes,
}

impl OffchainLookup {
    /// `OffchainLookup(address,string[],bytes,bytes4,bytes)` revert data.
    #[must_use]
    pub fn abi_encode(&self) -> Bytes {
        abi::encode_offchain_lookup(
            self.sender,
            &self.urls,
            self.call_data.as_slice(),
            self.callback,
            self.extra_data.as_slice(),
        )
    }
}
