//! # Offchain Resolver
//!
//! The CCIP-Read resolver contract:
//!
//! 1. `resolve(name, data)` never answers directly. It returns an
//!    [`OffchainLookup`] pointing at the gateway URL, with the inner
//!    `IResolverService.resolve` call as both `callData` and `extraData`.
//! 2. `resolveWithProof(response, extraData)` verifies the gateway's
//!    signature over `extraData` and the result, checks the signer set and
//!    hands back the result unchanged.
//!
//! Nothing is remembered between the two calls.
//!
//! The same code serves standalone deployments and UUPS proxies. Upgrades
//! go through `upgradeToAndCall` only, gated on the owner.

use super::call::{CallOutput, ResolverCall};
use super::{ExecutionContext, ResolverCode};
use crate::domain::{InitParams, OffchainLookup, ResolverEvent, Role, RoleModel};
use crate::errors::ResolverError;
use ens_02_signature_verification::{ResponseVerifier, SignatureVerifier};
use shared_types::abi::{
    encode_resolve_call, ERC165_INTERFACE_ID, EXTENDED_RESOLVER_INTERFACE_ID,
    RESOLVE_WITH_PROOF_SELECTOR,
};
use shared_types::{Address, Bytes, Selector};
use tracing::{debug, info, warn};

/// Version written by `initialize`.
const INITIAL_VERSION: u64 = 1;

/// Resolver code, generic over the response verifier.
#[derive(Debug, Clone, Default)]
pub struct OffchainResolver<V: ResponseVerifier = SignatureVerifier> {
    verifier: V,
}

impl OffchainResolver<SignatureVerifier> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            verifier: SignatureVerifier::new(),
        }
    }
}

impl<V: ResponseVerifier> OffchainResolver<V> {
    pub fn with_verifier(verifier: V) -> Self {
        Self { verifier }
    }

    // =========================================================================
    // RESOLUTION
    // =========================================================================

    fn resolve(&self, ctx: &ExecutionContext<'_>, name: &Bytes, data: &Bytes) -> CallOutput {
        let call_data = encode_resolve_call(name.as_slice(), data.as_slice());
        // Names are opaque here; decoding is for the log line only.
        let readable = ens_01_dns_codec::decode(name.as_slice()).unwrap_or_else(|_| name.to_hex());
        debug!(resolver = %ctx.this, name = %readable, "offchain lookup requested");
        CallOutput::Lookup(OffchainLookup {
            sender: ctx.this,
            urls: vec![ctx.state.url.clone()],
            call_data: call_data.clone(),
            callback: RESOLVE_WITH_PROOF_SELECTOR,
            extra_data: call_data,
        })
    }

    fn resolve_with_proof(
        &self,
        ctx: &ExecutionContext<'_>,
        response: &Bytes,
        extra_data: &Bytes,
    ) -> Result<CallOutput, ResolverError> {
        let verified = self.verifier.verify(
            ctx.this,
            extra_data.as_slice(),
            response.as_slice(),
            ctx.block.timestamp,
        )?;

        if !ctx.state.signers.contains(&verified.signer) {
            warn!(signer = %verified.signer, resolver = %ctx.this, "response signed by unauthorized signer");
            return Err(ResolverError::UnauthorizedSigner {
                signer: verified.signer,
            });
        }

        debug!(signer = %verified.signer, bytes = verified.result.len(), "offchain answer accepted");
        Ok(CallOutput::Bytes(verified.result))
    }

    fn supports_interface(id: Selector) -> bool {
        id == ERC165_INTERFACE_ID || id == EXTENDED_RESOLVER_INTERFACE_ID
    }

    // =========================================================================
    // ADMINISTRATION
    // =========================================================================

    fn set_url(&self, ctx: &mut ExecutionContext<'_>, url: &str) -> Result<CallOutput, ResolverError> {
        ctx.state.access.require(Role::GatewayManager, ctx.caller)?;
        let old = std::mem::replace(&mut ctx.state.url, url.to_string());
        info!(old = %old, new = %url, "gateway url changed");
        ctx.emit(ResolverEvent::UrlChanged {
            old,
            new: url.to_string(),
        });
        Ok(CallOutput::Unit)
    }

    fn add_signers(
        &self,
        ctx: &mut ExecutionContext<'_>,
        signers: &[Address],
    ) -> Result<CallOutput, ResolverError> {
        ctx.state.access.require(Role::SignerManager, ctx.caller)?;
        let updates = ctx.state.signers.add(signers);
        info!(
            requested = signers.len(),
            added = updates.iter().filter(|u| u.applied).count(),
            "signers added"
        );
        ctx.emit(ResolverEvent::SignersAdded {
            signers: signers.to_vec(),
        });
        Ok(CallOutput::SignerUpdates(updates))
    }

    fn remove_signers(
        &self,
        ctx: &mut ExecutionContext<'_>,
        signers: &[Address],
    ) -> Result<CallOutput, ResolverError> {
        ctx.state.access.require(Role::SignerManager, ctx.caller)?;
        let updates = ctx.state.signers.remove(signers);
        info!(
            requested = signers.len(),
            removed = updates.iter().filter(|u| u.applied).count(),
            "signers removed"
        );
        ctx.emit(ResolverEvent::SignersRemoved {
            signers: signers.to_vec(),
        });
        Ok(CallOutput::SignerUpdates(updates))
    }

    fn transfer_ownership(
        &self,
        ctx: &mut ExecutionContext<'_>,
        new_owner: Address,
    ) -> Result<CallOutput, ResolverError> {
        let previous = ctx.state.access.transfer_ownership(ctx.caller, new_owner)?;
        info!(%previous, new = %new_owner, "ownership transferred");
        ctx.emit(ResolverEvent::OwnershipTransferred {
            previous,
            new: new_owner,
        });
        Ok(CallOutput::Unit)
    }

    fn renounce_ownership(&self, ctx: &mut ExecutionContext<'_>) -> Result<CallOutput, ResolverError> {
        let previous = ctx.state.access.renounce_ownership(ctx.caller)?;
        info!(%previous, "ownership renounced");
        ctx.emit(ResolverEvent::OwnershipTransferred {
            previous,
            new: Address::ZERO,
        });
        Ok(CallOutput::Unit)
    }

    fn change_manager(
        &self,
        ctx: &mut ExecutionContext<'_>,
        role: Role,
        new_manager: Address,
    ) -> Result<CallOutput, ResolverError> {
        let event = if role == Role::SignerManager {
            let previous = ctx
                .state
                .access
                .change_signer_manager(ctx.caller, new_manager)?;
            ResolverEvent::SignerManagerChanged {
                previous,
                new: new_manager,
            }
        } else {
            let previous = ctx
                .state
                .access
                .change_gateway_manager(ctx.caller, new_manager)?;
            ResolverEvent::GatewayManagerChanged {
                previous,
                new: new_manager,
            }
        };
        info!(?role, new = %new_manager, "manager changed");
        ctx.emit(event);
        Ok(CallOutput::Unit)
    }

    // =========================================================================
    // INITIALIZATION
    // =========================================================================

    fn initialize(
        &self,
        ctx: &mut ExecutionContext<'_>,
        params: &InitParams,
    ) -> Result<CallOutput, ResolverError> {
        ctx.state.begin_initializer(INITIAL_VERSION)?;
        let access = params.access_control()?;

        ctx.state.access = access;
        ctx.state.url.clone_from(&params.url);
        ctx.state.signers.add(&params.signers);

        ctx.emit(ResolverEvent::OwnershipTransferred {
            previous: Address::ZERO,
            new: params.owner,
        });
        if params.role_model == RoleModel::Delegated {
            ctx.emit(ResolverEvent::SignerManagerChanged {
                previous: Address::ZERO,
                new: params.signer_manager,
            });
            ctx.emit(ResolverEvent::GatewayManagerChanged {
                previous: Address::ZERO,
                new: params.gateway_manager,
            });
        }
        ctx.emit(ResolverEvent::UrlChanged {
            old: String::new(),
            new: params.url.clone(),
        });
        if !params.signers.is_empty() {
            ctx.emit(ResolverEvent::SignersAdded {
                signers: params.signers.clone(),
            });
        }
        ctx.emit(ResolverEvent::Initialized {
            version: INITIAL_VERSION,
        });

        info!(
            resolver = %ctx.this,
            owner = %params.owner,
            model = %params.role_model,
            signers = ctx.state.signers.len(),
            "resolver initialized"
        );
        Ok(CallOutput::Unit)
    }

    fn reinitialize(
        &self,
        ctx: &mut ExecutionContext<'_>,
        version: u64,
    ) -> Result<CallOutput, ResolverError> {
        ctx.state.access.require(Role::Owner, ctx.caller)?;
        ctx.state.begin_initializer(version)?;
        ctx.emit(ResolverEvent::Initialized { version });
        info!(resolver = %ctx.this, version, "resolver reinitialized");
        Ok(CallOutput::Unit)
    }

    // =========================================================================
    // UPGRADES (UUPS)
    // =========================================================================

    fn implementation(ctx: &ExecutionContext<'_>) -> Result<CallOutput, ResolverError> {
        ctx.only_proxy()?;
        Ok(CallOutput::Address(ctx.code_address))
    }

    /// Upgrade authorization hook.
    fn authorize_upgrade(ctx: &ExecutionContext<'_>) -> Result<(), ResolverError> {
        ctx.state.access.require(Role::Owner, ctx.caller)
    }

    fn upgrade_to_and_call(
        &self,
        ctx: &mut ExecutionContext<'_>,
        new_implementation: Address,
        data: Option<&ResolverCall>,
    ) -> Result<CallOutput, ResolverError> {
        ctx.only_proxy()?;
        Self::authorize_upgrade(ctx)?;

        let code = ctx
            .codes
            .get(&new_implementation)
            .filter(|code| code.is_proxiable())
            .cloned()
            .ok_or(ResolverError::InvalidImplementation(new_implementation))?;

        if let Some(slot) = ctx.proxy.as_deref_mut() {
            slot.implementation = new_implementation;
        }
        ctx.emit(ResolverEvent::Upgraded {
            implementation: new_implementation,
        });
        info!(
            proxy = %ctx.this,
            from = %ctx.code_address,
            to = %new_implementation,
            code = code.name(),
            "implementation upgraded"
        );

        if let Some(init) = data {
            code.execute(&mut ctx.delegate(new_implementation), init)?;
        }
        Ok(CallOutput::Unit)
    }
}

impl<V: ResponseVerifier> ResolverCode for OffchainResolver<V> {
    fn name(&self) -> &str {
        "OffchainResolver"
    }

    fn execute(
        &self,
        ctx: &mut ExecutionContext<'_>,
        call: &ResolverCall,
    ) -> Result<CallOutput, ResolverError> {
        match call {
            ResolverCall::Url => Ok(CallOutput::Text(ctx.state.url.clone())),
            ResolverCall::IsSigner(address) => {
                Ok(CallOutput::Bool(ctx.state.signers.contains(address)))
            }
            ResolverCall::Signers => Ok(CallOutput::Addresses(ctx.state.signers.members().to_vec())),
            ResolverCall::Owner => Ok(CallOutput::Address(ctx.state.access.holder(Role::Owner))),
            ResolverCall::SignerManager => {
                Ok(CallOutput::Address(ctx.state.access.holder(Role::SignerManager)))
            }
            ResolverCall::GatewayManager => {
                Ok(CallOutput::Address(ctx.state.access.holder(Role::GatewayManager)))
            }
            ResolverCall::RoleModel => Ok(CallOutput::RoleModel(ctx.state.access.model())),
            ResolverCall::Implementation => Self::implementation(ctx),
            ResolverCall::MakeSignatureHash {
                expires,
                request,
                result,
            } => Ok(CallOutput::Hash(self.verifier.make_signature_hash(
                ctx.this,
                *expires,
                request.as_slice(),
                result.as_slice(),
            ))),
            ResolverCall::SupportsInterface(id) => Ok(CallOutput::Bool(Self::supports_interface(*id))),

            ResolverCall::Resolve { name, data } => Ok(self.resolve(ctx, name, data)),
            ResolverCall::ResolveWithProof {
                response,
                extra_data,
            } => self.resolve_with_proof(ctx, response, extra_data),

            ResolverCall::SetUrl(url) => self.set_url(ctx, url),
            ResolverCall::AddSigners(signers) => self.add_signers(ctx, signers),
            ResolverCall::RemoveSigners(signers) => self.remove_signers(ctx, signers),
            ResolverCall::TransferOwnership(new_owner) => self.transfer_ownership(ctx, *new_owner),
            ResolverCall::RenounceOwnership => self.renounce_ownership(ctx),
            ResolverCall::ChangeSignerManager(manager) => {
                self.change_manager(ctx, Role::SignerManager, *manager)
            }
            ResolverCall::ChangeGatewayManager(manager) => {
                self.change_manager(ctx, Role::GatewayManager, *manager)
            }
            ResolverCall::Initialize(params) => self.initialize(ctx, params),
            ResolverCall::Reinitialize(version) => self.reinitialize(ctx, *version),
            ResolverCall::UpgradeTo(_) => Err(ResolverError::UpgradeToDisabled),
            ResolverCall::UpgradeToAndCall {
                new_implementation,
                data,
            } => self.upgrade_to_and_call(ctx, *new_implementation, data.as_deref()),
        }
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
