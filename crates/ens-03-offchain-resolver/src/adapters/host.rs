//! # In-Memory Host
//!
//! Deterministic single-threaded chain the resolver runs on.
//!
//! - Every account has two storage namespaces: [`ResolverState`] (written by
//!   resolver code) and, for proxies, a [`ProxySlot`] (the implementation
//!   pointer).
//! - [`Host::transact`] snapshots the target's namespaces and the log length,
//!   runs the call and restores the snapshot on any error. A failed call
//!   leaves no trace.
//! - [`Host::call`] runs against a scratch copy and never commits
//!   (`eth_call`).

use crate::contract::{
    CallOutput, CodeRegistry, Deployment, ExecutionContext, ResolverCall, ResolverCode,
};
use crate::domain::{BlockContext, LogEntry, ProxySlot, ResolverEvent, ResolverState};
use crate::errors::ResolverError;
use shared_types::{keccak256, Address, Timestamp};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Pre-call copy of one account.
struct Snapshot {
    state: Option<ResolverState>,
    proxy: Option<ProxySlot>,
    log_len: usize,
}

/// In-memory chain with resolver code, proxies and an append-only log.
#[derive(Default)]
pub struct Host {
    codes: CodeRegistry,
    storages: HashMap<Address, ResolverState>,
    proxies: HashMap<Address, ProxySlot>,
    logs: Vec<LogEntry>,
    block: BlockContext,
    nonces: HashMap<Address, u64>,
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("codes", &self.codes.len())
            .field("proxies", &self.proxies.len())
            .field("logs", &self.logs.len())
            .field("block", &self.block)
            .finish()
    }
}

impl Host {
    /// Create a host at the given block.
    #[must_use]
    pub fn new(block: BlockContext) -> Self {
        Self {
            block,
            ..Self::default()
        }
    }

    // =========================================================================
    // CLOCK
    // =========================================================================

    #[must_use]
    pub fn block(&self) -> BlockContext {
        self.block
    }

    /// Jump to `timestamp`, mining one block.
    pub fn set_timestamp(&mut self, timestamp: Timestamp) {
        self.block.number += 1;
        self.block.timestamp = timestamp;
    }

    /// Move the clock forward by `seconds`, mining one block.
    pub fn advance(&mut self, seconds: u64) {
        self.set_timestamp(self.block.timestamp.saturating_add(seconds));
    }

    // =========================================================================
    // DEPLOYMENT
    // =========================================================================

    /// Next CREATE-style address for `deployer`: the low 20 bytes of
    /// `keccak256(deployer ‖ nonce)`.
    fn next_address(&mut self, deployer: Address) -> Address {
        let nonce = self.nonces.entry(deployer).or_insert(0);
        let mut preimage = [0u8; 28];
        preimage[..20].copy_from_slice(deployer.as_bytes());
        preimage[20..].copy_from_slice(&nonce.to_be_bytes());
        *nonce += 1;

        let hash = keccak256(&preimage);
        let mut address = [0u8; 20];
        address.copy_from_slice(&hash.as_bytes()[12..]);
        Address::new(address)
    }

    /// Deploy resolver code and run its constructor. Nothing but the
    /// deployer's nonce changes if the constructor fails.
    #[instrument(skip(self, code, deployment), fields(code = code.name()))]
    pub fn deploy_code(
        &mut self,
        deployer: Address,
        code: Arc<dyn ResolverCode>,
        deployment: Deployment,
    ) -> Result<Address, ResolverError> {
        let address = self.next_address(deployer);
        let mut state = ResolverState::default();
        let mut logs = Vec::new();

        {
            let mut ctx = ExecutionContext::new(
                deployer,
                address,
                address,
                self.block,
                &mut state,
                None,
                &self.codes,
                &mut logs,
            );
            code.construct(&mut ctx, &deployment).map_err(|e| {
                warn!(error = %e, "constructor reverted");
                e
            })?;
        }

        self.codes.insert(address, code);
        self.storages.insert(address, state);
        self.logs.append(&mut logs);
        info!(%address, %deployer, "code deployed");
        Ok(address)
    }

    /// Deploy an ERC-1967 proxy pointing at `implementation` and run
    /// `init` through it. Pointer, storage and init call commit together;
    /// only the deployer's nonce survives a failure.
    ///
    /// # Errors
    /// * `InvalidImplementation` - no proxiable code at `implementation`
    /// * any error from `init`
    #[instrument(skip(self, init))]
    pub fn deploy_proxy(
        &mut self,
        deployer: Address,
        implementation: Address,
        init: Option<ResolverCall>,
    ) -> Result<Address, ResolverError> {
        if !self
            .codes
            .get(&implementation)
            .is_some_and(|code| code.is_proxiable())
        {
            return Err(ResolverError::InvalidImplementation(implementation));
        }

        let proxy = self.next_address(deployer);
        let log_len = self.logs.len();

        self.proxies.insert(proxy, ProxySlot { implementation });
        self.storages.insert(proxy, ResolverState::default());
        self.logs.push(LogEntry {
            emitter: proxy,
            block: self.block.number,
            event: ResolverEvent::Upgraded { implementation },
        });

        if let Some(call) = init {
            if let Err(e) = self.execute(deployer, proxy, &call) {
                warn!(error = %e, %proxy, "proxy initialization reverted");
                self.proxies.remove(&proxy);
                self.storages.remove(&proxy);
                self.logs.truncate(log_len);
                return Err(e);
            }
        }

        info!(%proxy, %implementation, "proxy deployed");
        Ok(proxy)
    }

    // =========================================================================
    // EXECUTION
    // =========================================================================

    /// Execute a state-changing call; on error every change is rolled back.
    #[instrument(skip(self, call), fields(call = call.name()))]
    pub fn transact(
        &mut self,
        from: Address,
        to: Address,
        call: ResolverCall,
    ) -> Result<CallOutput, ResolverError> {
        let snapshot = self.snapshot(to);
        match self.execute(from, to, &call) {
            Ok(output) => {
                debug!(output = output.variant(), "transaction committed");
                Ok(output)
            }
            Err(e) => {
                self.restore(to, snapshot);
                warn!(error = %e, code = e.code(), "transaction reverted");
                Err(e)
            }
        }
    }

    /// Execute a call against a scratch copy. Nothing is ever committed.
    pub fn call(
        &self,
        from: Address,
        to: Address,
        call: &ResolverCall,
    ) -> Result<CallOutput, ResolverError> {
        if !call.is_view() {
            debug!(call = call.name(), "simulating a state-changing call; nothing is committed");
        }
        let (code_address, mut proxy) = self.route(to)?;
        let code = self.code(code_address)?;
        let mut state = self.storages.get(&to).cloned().unwrap_or_default();
        let mut logs = Vec::new();

        let mut ctx = ExecutionContext::new(
            from,
            to,
            code_address,
            self.block,
            &mut state,
            proxy.as_mut(),
            &self.codes,
            &mut logs,
        );
        code.execute(&mut ctx, call)
    }

    /// Resolve `to` into (code address, proxy slot copy).
    fn route(&self, to: Address) -> Result<(Address, Option<ProxySlot>), ResolverError> {
        match self.proxies.get(&to) {
            Some(slot) => Ok((slot.implementation, Some(*slot))),
            None if self.codes.contains_key(&to) => Ok((to, None)),
            None => Err(ResolverError::NoCode(to)),
        }
    }

    fn code(&self, address: Address) -> Result<Arc<dyn ResolverCode>, ResolverError> {
        self.codes
            .get(&address)
            .cloned()
            .ok_or(ResolverError::NoCode(address))
    }

    fn execute(
        &mut self,
        from: Address,
        to: Address,
        call: &ResolverCall,
    ) -> Result<CallOutput, ResolverError> {
        let (code_address, _) = self.route(to)?;
        let code = self.code(code_address)?;

        let Self {
            codes,
            storages,
            proxies,
            logs,
            block,
            ..
        } = self;

        let mut ctx = ExecutionContext::new(
            from,
            to,
            code_address,
            *block,
            storages.entry(to).or_default(),
            proxies.get_mut(&to),
            codes,
            logs,
        );
        code.execute(&mut ctx, call)
    }

    fn snapshot(&self, to: Address) -> Snapshot {
        Snapshot {
            state: self.storages.get(&to).cloned(),
            proxy: self.proxies.get(&to).copied(),
            log_len: self.logs.len(),
        }
    }

    fn restore(&mut self, to: Address, snapshot: Snapshot) {
        match snapshot.state {
            Some(state) => self.storages.insert(to, state),
            None => self.storages.remove(&to),
        };
        match snapshot.proxy {
            Some(slot) => self.proxies.insert(to, slot),
            None => self.proxies.remove(&to),
        };
        self.logs.truncate(snapshot.log_len);
    }

    // =========================================================================
    // INSPECTION
    // =========================================================================

    /// Raw read of a proxy's implementation slot (`eth_getStorageAt`).
    #[must_use]
    pub fn implementation_slot(&self, proxy: Address) -> Option<Address> {
        self.proxies.get(&proxy).map(|slot| slot.implementation)
    }

    #[must_use]
    pub fn has_code(&self, address: Address) -> bool {
        self.codes.contains_key(&address) || self.proxies.contains_key(&address)
    }

    /// Every event in emission order.
    #[must_use]
    pub fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    /// Events emitted by `emitter`.
    pub fn logs_for(&self, emitter: Address) -> impl Iterator<Item = &LogEntry> {
        self.logs.iter().filter(move |log| log.emitter == emitter)
    }
}
