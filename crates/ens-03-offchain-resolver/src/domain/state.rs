//! # Contract Storage
//!
//! The two storage namespaces of a resolver account:
//!
//! - [`ResolverState`]: owned by the resolver code (URL, signers, roles,
//!   initializer version). Through a proxy it lives at the proxy address.
//! - [`ProxySlot`]: owned by the proxy (the implementation pointer). Resolver
//!   code reaches it only through the upgrade entry points.

use super::roles::{AccessControl, RoleModel};
use super::signer_set::SignerSet;
use crate::errors::ResolverError;
use serde::{Deserialize, Serialize};
use shared_types::Address;

/// Initializer version recorded by implementation contracts at deployment.
pub const INITIALIZERS_DISABLED: u64 = u64::MAX;

/// Arguments of `initialize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitParams {
    pub url: String,
    pub signers: Vec<Address>,
    pub owner: Address,
    pub role_model: RoleModel,
    /// Ignored under `RoleModel::Simple`.
    pub signer_manager: Address,
    /// Ignored under `RoleModel::Simple`.
    pub gateway_manager: Address,
}

impl InitParams {
    #[must_use]
    pub fn simple(url: impl Into<String>, signers: Vec<Address>, owner: Address) -> Self {
        Self {
            url: url.into(),
            signers,
            owner,
            role_model: RoleModel::Simple,
            signer_manager: Address::ZERO,
            gateway_manager: Address::ZERO,
        }
    }

    #[must_use]
    pub fn delegated(
        url: impl Into<String>,
        signers: Vec<Address>,
        owner: Address,
        signer_manager: Address,
        gateway_manager: Address,
    ) -> Self {
        Self {
            url: url.into(),
            signers,
            owner,
            role_model: RoleModel::Delegated,
            signer_manager,
            gateway_manager,
        }
    }

    /// Role layout these parameters describe.
    pub fn access_control(&self) -> Result<AccessControl, ResolverError> {
        if self.owner.is_zero() {
            return Err(ResolverError::ZeroAddress);
        }
        match self.role_model {
            RoleModel::Simple => Ok(AccessControl::simple(self.owner)),
            RoleModel::Delegated => {
                if self.signer_manager.is_zero() || self.gateway_manager.is_zero() {
                    return Err(ResolverError::ZeroAddress);
                }
                Ok(AccessControl::delegated(
                    self.owner,
                    self.signer_manager,
                    self.gateway_manager,
                ))
            }
        }
    }
}

/// Resolver-owned storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverState {
    pub url: String,
    pub signers: SignerSet,
    pub access: AccessControl,
    /// Highest initializer version run so far; 0 means never initialized.
    pub initialized: u64,
}

impl ResolverState {
    /// Record that initializer `version` runs now.
    ///
    /// # Errors
    /// * `AlreadyInitialized` - `version` is not above the recorded one
    pub fn begin_initializer(&mut self, version: u64) -> Result<(), ResolverError> {
        if self.initialized >= version {
            return Err(ResolverError::AlreadyInitialized);
        }
        self.initialized = version;
        Ok(())
    }

    /// Lock every future initializer. Returns false if already locked.
    pub fn disable_initializers(&mut self) -> bool {
        if self.initialized == INITIALIZERS_DISABLED {
            return false;
        }
        self.initialized = INITIALIZERS_DISABLED;
        true
    }
}

/// Proxy-owned storage (ERC-1967 implementation slot).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxySlot {
    pub implementation: Address,
}
