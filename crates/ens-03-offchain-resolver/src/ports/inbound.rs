//! # Inbound Ports (Driving Ports / API)
//!
//! Name resolution as offered to applications.

use crate::errors::ClientError;
use async_trait::async_trait;
use shared_types::{Address, Bytes};

/// ENSIP-10 resolution through a CCIP-Read resolver.
#[async_trait]
pub trait NameResolution: Send + Sync {
    /// Resolve `data` (an inner resolver call such as `addr(bytes32)`) for
    /// `name`, following offchain lookups until the resolver answers.
    async fn resolve(&self, resolver: Address, name: &str, data: Bytes)
        -> Result<Bytes, ClientError>;

    /// Resolve the `addr(bytes32)` record of `name`.
    async fn resolve_addr(&self, resolver: Address, name: &str) -> Result<Address, ClientError>;

    /// Resolve the `text(bytes32,string)` record `key` of `name`.
    async fn resolve_text(
        &self,
        resolver: Address,
        name: &str,
        key: &str,
    ) -> Result<String, ClientError>;
}
