//! # Domain Layer
//!
//! Resolver storage, roles, signers and events. No I/O.

pub mod entities;
pub mod events;
pub mod roles;
pub mod signer_set;
pub mod state;

pub use entities::{BlockContext, OffchainLookup};
pub use events::{LogEntry, ResolverEvent};
pub use roles::{AccessControl, Role, RoleModel};
pub use signer_set::{SignerSet, SignerUpdate};
pub use state::{InitParams, ProxySlot, ResolverState, INITIALIZERS_DISABLED};
