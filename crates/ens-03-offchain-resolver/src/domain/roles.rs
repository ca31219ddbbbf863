//! # Access Control
//!
//! Role storage and the single guard every mutating entry point goes through.
//!
//! Two role models exist and one is fixed per deployment at initialization:
//!
//! | Model | Owner | Signer manager | Gateway manager |
//! |-------|-------|----------------|-----------------|
//! | `Simple` | owner | owner | owner |
//! | `Delegated` | owner | own address | own address |
//!
//! In `Delegated` the owner cannot touch signers or the URL directly; it can
//! only reassign the managers. Renouncing ownership never revokes a manager.

use crate::errors::ResolverError;
use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::fmt;
use std::str::FromStr;

/// A role a caller may need to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Owner,
    SignerManager,
    GatewayManager,
}

/// How roles are laid out for a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleModel {
    /// One owner gates everything.
    Simple,
    /// Owner plus independent signer and gateway managers.
    #[default]
    Delegated,
}

impl fmt::Display for RoleModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple => write!(f, "simple"),
            Self::Delegated => write!(f, "delegated"),
        }
    }
}

impl FromStr for RoleModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "delegated" => Ok(Self::Delegated),
            other => Err(format!("unknown role model: {other}")),
        }
    }
}

/// Role holders for one resolver.
///
/// A default value has every role at the zero address, which no caller can
/// satisfy, so an uninitialized resolver rejects every gated call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccessControl {
    model: RoleModel,
    owner: Address,
    signer_manager: Address,
    gateway_manager: Address,
}

impl AccessControl {
    /// Single-owner layout.
    #[must_use]
    pub fn simple(owner: Address) -> Self {
        Self {
            model: RoleModel::Simple,
            owner,
            signer_manager: Address::ZERO,
            gateway_manager: Address::ZERO,
        }
    }

    /// Owner plus two managers.
    #[must_use]
    pub fn delegated(owner: Address, signer_manager: Address, gateway_manager: Address) -> Self {
        Self {
            model: RoleModel::Delegated,
            owner,
            signer_manager,
            gateway_manager,
        }
    }

    #[must_use]
    pub fn model(&self) -> RoleModel {
        self.model
    }

    /// Current holder of `role`. Managers collapse into the owner in `Simple`.
    #[must_use]
    pub fn holder(&self, role: Role) -> Address {
        match (self.model, role) {
            (_, Role::Owner) | (RoleModel::Simple, _) => self.owner,
            (RoleModel::Delegated, Role::SignerManager) => self.signer_manager,
            (RoleModel::Delegated, Role::GatewayManager) => self.gateway_manager,
        }
    }

    /// Fail unless `caller` holds `role`. A role held by the zero address is
    /// held by nobody.
    pub fn require(&self, role: Role, caller: Address) -> Result<(), ResolverError> {
        let holder = self.holder(role);
        if !holder.is_zero() && holder == caller {
            return Ok(());
        }

        // Simple has only one role to be missing
        let effective = match self.model {
            RoleModel::Simple => Role::Owner,
            RoleModel::Delegated => role,
        };
        Err(match effective {
            Role::Owner => ResolverError::NotOwner { caller },
            Role::SignerManager => ResolverError::NotSignerManager { caller },
            Role::GatewayManager => ResolverError::NotGatewayManager { caller },
        })
    }

    // =========================================================================
    // MUTATIONS (each returns the previous holder)
    // =========================================================================

    /// Hand ownership to `new_owner`.
    pub fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
    ) -> Result<Address, ResolverError> {
        self.require(Role::Owner, caller)?;
        if new_owner.is_zero() {
            return Err(ResolverError::ZeroAddress);
        }
        Ok(std::mem::replace(&mut self.owner, new_owner))
    }

    /// Set the owner to the zero address. Every owner-gated call is locked
    /// from then on.
    pub fn renounce_ownership(&mut self, caller: Address) -> Result<Address, ResolverError> {
        self.require(Role::Owner, caller)?;
        Ok(std::mem::replace(&mut self.owner, Address::ZERO))
    }

    pub fn change_signer_manager(
        &mut self,
        caller: Address,
        new_manager: Address,
    ) -> Result<Address, ResolverError> {
        self.change_manager(caller, new_manager, Role::SignerManager)
    }

    pub fn change_gateway_manager(
        &mut self,
        caller: Address,
        new_manager: Address,
    ) -> Result<Address, ResolverError> {
        self.change_manager(caller, new_manager, Role::GatewayManager)
    }

    fn change_manager(
        &mut self,
        caller: Address,
        new_manager: Address,
        role: Role,
    ) -> Result<Address, ResolverError> {
        if self.model == RoleModel::Simple {
            return Err(ResolverError::UnsupportedOperation(match role {
                Role::SignerManager => "changeSignerManager",
                _ => "changeGatewayManager",
            }));
        }
        self.require(Role::Owner, caller)?;
        if new_manager.is_zero() {
            return Err(ResolverError::ZeroAddress);
        }
        let slot = match role {
            Role::SignerManager => &mut self.signer_manager,
            _ => &mut self.gateway_manager,
        };
        Ok(std::mem::replace(slot, new_manager))
    }
}
