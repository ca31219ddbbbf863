//! # Contract Layer
//!
//! Resolver code as the host executes it. Code is stateless; every call
//! receives an [`ExecutionContext`] borrowing the storage of the account it
//! runs against. Through a proxy that account is the proxy, not the code.

pub mod call;
pub mod resolver;

pub use call::{CallOutput, ResolverCall};
pub use resolver::OffchainResolver;

use crate::domain::{
    BlockContext, InitParams, LogEntry, ProxySlot, ResolverEvent, ResolverState,
    INITIALIZERS_DISABLED,
};
use crate::errors::ResolverError;
use shared_types::Address;
use std::collections::HashMap;
use std::sync::Arc;

/// Deployed code by address.
pub type CodeRegistry = HashMap<Address, Arc<dyn ResolverCode>>;

/// How a piece of code is brought onto the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deployment {
    /// Logic contract behind proxies; its own initializers are locked.
    Implementation,
    /// Self-contained resolver, initialized in its constructor.
    Standalone(InitParams),
}

/// Executable resolver code.
pub trait ResolverCode: Send + Sync {
    /// Human-readable code name, used in logs.
    fn name(&self) -> &str;

    /// Whether a proxy may point at this code.
    fn is_proxiable(&self) -> bool {
        true
    }

    /// Run one entry point.
    fn execute(
        &self,
        ctx: &mut ExecutionContext<'_>,
        call: &ResolverCall,
    ) -> Result<CallOutput, ResolverError>;

    /// Constructor run once by the host at deployment.
    fn construct(
        &self,
        ctx: &mut ExecutionContext<'_>,
        deployment: &Deployment,
    ) -> Result<(), ResolverError> {
        match deployment {
            Deployment::Implementation => {
                if ctx.state.disable_initializers() {
                    ctx.emit(ResolverEvent::Initialized {
                        version: INITIALIZERS_DISABLED,
                    });
                }
                Ok(())
            }
            Deployment::Standalone(params) => self
                .execute(ctx, &ResolverCall::Initialize(params.clone()))
                .map(|_| ()),
        }
    }
}

// =============================================================================
// EXECUTION CONTEXT
// =============================================================================

/// Everything one call may see or touch.
pub struct ExecutionContext<'a> {
    /// Immediate caller.
    pub caller: Address,
    /// Account whose storage is in use (the proxy when delegated).
    pub this: Address,
    /// Address of the code being executed.
    pub code_address: Address,
    pub block: BlockContext,
    pub state: &'a mut ResolverState,
    /// Present only when `this` is a proxy.
    pub proxy: Option<&'a mut ProxySlot>,
    pub codes: &'a CodeRegistry,
    logs: &'a mut Vec<LogEntry>,
}

impl<'a> ExecutionContext<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        caller: Address,
        this: Address,
        code_address: Address,
        block: BlockContext,
        state: &'a mut ResolverState,
        proxy: Option<&'a mut ProxySlot>,
        codes: &'a CodeRegistry,
        logs: &'a mut Vec<LogEntry>,
    ) -> Self {
        Self {
            caller,
            this,
            code_address,
            block,
            state,
            proxy,
            codes,
            logs,
        }
    }

    /// Record an event emitted by `this`.
    pub fn emit(&mut self, event: ResolverEvent) {
        self.logs.push(LogEntry {
            emitter: self.this,
            block: self.block.number,
            event,
        });
    }

    /// True when running through a proxy whose pointer targets this code.
    #[must_use]
    pub fn is_delegated(&self) -> bool {
        self.this != self.code_address
            && self
                .proxy
                .as_ref()
                .is_some_and(|slot| slot.implementation == self.code_address)
    }

    /// Fail with `NotDelegated` unless [`Self::is_delegated`].
    pub fn only_proxy(&self) -> Result<(), ResolverError> {
        if self.is_delegated() {
            Ok(())
        } else {
            Err(ResolverError::NotDelegated)
        }
    }

    /// Same storage and caller, different code (delegatecall).
    pub fn delegate(&mut self, code_address: Address) -> ExecutionContext<'_> {
        ExecutionContext {
            caller: self.caller,
            this: self.this,
            code_address,
            block: self.block,
            state: &mut *self.state,
            proxy: self.proxy.as_deref_mut(),
            codes: self.codes,
            logs: &mut *self.logs,
        }
    }
}
