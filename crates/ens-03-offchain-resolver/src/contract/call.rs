//! # Calls and Outputs
//!
//! Typed entry points of a resolver contract and the values they return.

use crate::domain::{InitParams, OffchainLookup, RoleModel, SignerUpdate};
use shared_types::{Address, Bytes, Hash, Selector, Timestamp};

/// One invocation of a resolver entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverCall {
    // === Reads ===
    Url,
    IsSigner(Address),
    Signers,
    Owner,
    SignerManager,
    GatewayManager,
    RoleModel,
    Implementation,
    MakeSignatureHash {
        expires: Timestamp,
        request: Bytes,
        result: Bytes,
    },
    SupportsInterface(Selector),

    // === Resolution ===
    Resolve {
        name: Bytes,
        data: Bytes,
    },
    ResolveWithProof {
        response: Bytes,
        extra_data: Bytes,
    },

    // === Writes ===
    SetUrl(String),
    AddSigners(Vec<Address>),
    RemoveSigners(Vec<Address>),
    TransferOwnership(Address),
    RenounceOwnership,
    ChangeSignerManager(Address),
    ChangeGatewayManager(Address),
    Initialize(InitParams),
    Reinitialize(u64),
    UpgradeTo(Address),
    UpgradeToAndCall {
        new_implementation: Address,
        /// Executed against the new code right after the pointer swap.
        data: Option<Box<ResolverCall>>,
    },
}

impl ResolverCall {
    /// Solidity-style entry point name, used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::IsSigner(_) => "isSigner",
            Self::Signers => "signers",
            Self::Owner => "owner",
            Self::SignerManager => "signerManager",
            Self::GatewayManager => "gatewayManager",
            Self::RoleModel => "roleModel",
            Self::Implementation => "implementation",
            Self::MakeSignatureHash { .. } => "makeSignatureHash",
            Self::SupportsInterface(_) => "supportsInterface",
            Self::Resolve { .. } => "resolve",
            Self::ResolveWithProof { .. } => "resolveWithProof",
            Self::SetUrl(_) => "setUrl",
            Self::AddSigners(_) => "addSigners",
            Self::RemoveSigners(_) => "removeSigners",
            Self::TransferOwnership(_) => "transferOwnership",
            Self::RenounceOwnership => "renounceOwnership",
            Self::ChangeSignerManager(_) => "changeSignerManager",
            Self::ChangeGatewayManager(_) => "changeGatewayManager",
            Self::Initialize(_) => "initialize",
            Self::Reinitialize(_) => "reinitialize",
            Self::UpgradeTo(_) => "upgradeTo",
            Self::UpgradeToAndCall { .. } => "upgradeToAndCall",
        }
    }

    /// True for entry points that never write storage.
    #[must_use]
    pub fn is_view(&self) -> bool {
        matches!(
            self,
            Self::Url
                | Self::IsSigner(_)
                | Self::Signers
                | Self::Owner
                | Self::SignerManager
                | Self::GatewayManager
                | Self::RoleModel
                | Self::Implementation
                | Self::MakeSignatureHash { .. }
                | Self::SupportsInterface(_)
                | Self::Resolve { .. }
                | Self::ResolveWithProof { .. }
        )
    }
}

/// Value returned by a successful call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutput {
    Unit,
    Bool(bool),
    Address(Address),
    Text(String),
    Addresses(Vec<Address>),
    Bytes(Bytes),
    Hash(Hash),
    RoleModel(RoleModel),
    /// `resolve` always ends here: fetch from a gateway and call back.
    Lookup(OffchainLookup),
    SignerUpdates(Vec<SignerUpdate>),
}

impl CallOutput {
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_address(&self) -> Option<Address> {
        match self {
            Self::Address(a) => Some(*a),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_bytes(self) -> Option<Bytes> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_lookup(self) -> Option<OffchainLookup> {
        match self {
            Self::Lookup(l) => Some(l),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_addresses(self) -> Option<Vec<Address>> {
        match self {
            Self::Addresses(a) => Some(a),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_updates(self) -> Option<Vec<SignerUpdate>> {
        match self {
            Self::SignerUpdates(u) => Some(u),
            _ => None,
        }
    }

    /// Short variant name for diagnostics.
    #[must_use]
    pub fn variant(&self) -> &'static str {
        match self {
            Self::Unit => "Unit",
            Self::Bool(_) => "Bool",
            Self::Address(_) => "Address",
            Self::Text(_) => "Text",
            Self::Addresses(_) => "Addresses",
            Self::Bytes(_) => "Bytes",
            Self::Hash(_) => "Hash",
            Self::RoleModel(_) => "RoleModel",
            Self::Lookup(_) => "Lookup",
            Self::SignerUpdates(_) => "SignerUpdates",
        }
    }
}
