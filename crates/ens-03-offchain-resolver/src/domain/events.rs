//! # Resolver Events
//!
//! Notifications emitted by committed calls. A reverted call emits nothing.

use serde::{Deserialize, Serialize};
use shared_types::Address;

/// Event payloads, one variant per notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum ResolverEvent {
    UrlChanged { old: String, new: String },
    /// Carries the full input list, including no-op entries.
    SignersAdded { signers: Vec<Address> },
    /// Carries the full input list, including no-op entries.
    SignersRemoved { signers: Vec<Address> },
    SignerManagerChanged { previous: Address, new: Address },
    GatewayManagerChanged { previous: Address, new: Address },
    OwnershipTransferred { previous: Address, new: Address },
    Initialized { version: u64 },
    Upgraded { implementation: Address },
}

/// An event as recorded by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Account whose storage the emitting code ran against.
    pub emitter: Address,
    pub block: u64,
    pub event: ResolverEvent,
}
