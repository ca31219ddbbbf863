//! # Offchain Resolver
//!
//! ENS resolver that answers through CCIP-Read (EIP-3668) gateways and only
//! accepts answers signed by a trusted signer set.
//!
//! ## Layout
//!
//! | Layer | Contents |
//! |-------|----------|
//! | `domain` | access control, signer set, resolver storage, events |
//! | `contract` | resolver code, calls and the execution context |
//! | `adapters` | in-memory host (proxies, rollback) and HTTP transport |
//! | `ports` | name resolution API, gateway transport SPI |
//! | `service` | CCIP-Read client driving lookups end to end |
//!
//! ## Resolution flow
//!
//! ```text
//! client ──resolve(name, data)──→ resolver
//!        ←──OffchainLookup(sender, urls, callData, callback, extraData)
//! client ──GET/POST──→ gateway ──(result, expires, sig)──→ client
//! client ──resolveWithProof(response, extraData)──→ resolver
//!        ←──result   (signer ∈ signers, expires > now)
//! ```
//!
//! ## Roles
//!
//! - `Simple`: the owner manages URL, signers and upgrades.
//! - `Delegated`: the signer manager edits signers, the gateway manager edits
//!   the URL, the owner authorizes upgrades and reassigns managers.

pub mod adapters;
pub mod config;
pub mod contract;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;

pub use adapters::Host;
#[cfg(feature = "http")]
pub use adapters::HttpGatewayTransport;
pub use config::{ClientConfig, ConfigError, ResolverConfig};
pub use contract::{
    CallOutput, CodeRegistry, Deployment, ExecutionContext, OffchainResolver, ResolverCall,
    ResolverCode,
};
pub use domain::{
    AccessControl, BlockContext, InitParams, LogEntry, OffchainLookup, ProxySlot, ResolverEvent,
    ResolverState, Role, RoleModel, SignerSet, SignerUpdate, INITIALIZERS_DISABLED,
};
pub use errors::{ClientError, ErrorKind, ResolverError};
pub use ports::inbound::NameResolution;
pub use ports::outbound::{
    GatewayRequest, GatewayResponse, GatewayTransport, HttpMethod, TransportError,
};
pub use service::{build_gateway_request, CcipReadService, ClientStats};
