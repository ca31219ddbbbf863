//! # CCIP-Read Client Service
//!
//! Drives ENSIP-10 resolution against a resolver on the [`Host`]:
//! call `resolve`, catch the `OffchainLookup`, query the gateways and hand
//! the signed answer back through `resolveWithProof`.
//!
//! ## Gateway protocol
//!
//! - `{sender}` and `{data}` in a URL template are replaced with the
//!   lowercase `0x` hex of the lookup sender and call data.
//! - Templates containing `{data}` are fetched with GET, all others with a
//!   POST carrying `{"data": ..., "sender": ...}`.
//! - 2xx: the body is `{"data": "0x..."}`.
//! - 4xx: resolution stops; the `message` field (or the raw body) is reported.
//! - 5xx, timeouts and transport errors: the next URL is tried.

use crate::adapters::host::Host;
use crate::config::ClientConfig;
use crate::contract::{CallOutput, ResolverCall};
use crate::domain::OffchainLookup;
use crate::errors::ClientError;
use crate::ports::inbound::NameResolution;
use crate::ports::outbound::{GatewayRequest, GatewayTransport, HttpMethod};
use async_trait::async_trait;
use ens_01_dns_codec::{encode as dns_encode, namehash};
use serde::{Deserialize, Serialize};
use shared_types::abi::{
    decode_addr_result, decode_text_result, encode_addr_call, encode_text_call,
    RESOLVE_WITH_PROOF_SELECTOR,
};
use shared_types::{Address, Bytes};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Client statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientStats {
    /// Resolutions started.
    pub resolutions: u64,
    /// Resolutions that produced a verified answer.
    pub successful: u64,
    pub failed: u64,
    /// `OffchainLookup`s followed.
    pub lookups: u64,
    /// Individual gateway requests sent.
    pub gateway_requests: u64,
    /// Gateway requests that failed and fell through to the next URL.
    pub gateway_failures: u64,
}

#[derive(Deserialize)]
struct GatewayData {
    data: Bytes,
}

#[derive(Deserialize)]
struct GatewayMessage {
    message: String,
}

/// Build the request for one gateway URL template.
#[must_use]
pub fn build_gateway_request(template: &str, sender: &str, data: &str) -> GatewayRequest {
    let url = template.replace("{sender}", sender).replace("{data}", data);

    if template.contains("{data}") {
        GatewayRequest {
            method: HttpMethod::Get,
            url,
            body: None,
        }
    } else {
        let body = serde_json::json!({ "data": data, "sender": sender }).to_string();
        GatewayRequest {
            method: HttpMethod::Post,
            url,
            body: Some(body),
        }
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<GatewayMessage>(body)
        .map(|m| m.message)
        .unwrap_or_else(|_| body.to_string())
}

/// CCIP-Read client over a shared host.
pub struct CcipReadService<T: GatewayTransport> {
    host: Arc<RwLock<Host>>,
    transport: Arc<T>,
    config: ClientConfig,
    stats: Arc<RwLock<ClientStats>>,
}

impl<T: GatewayTransport> CcipReadService<T> {
    pub fn new(host: Arc<RwLock<Host>>, transport: T, config: ClientConfig) -> Self {
        Self {
            host,
            transport: Arc::new(transport),
            config,
            stats: Arc::new(RwLock::new(ClientStats::default())),
        }
    }

    /// The host this client resolves against.
    #[must_use]
    pub fn host(&self) -> Arc<RwLock<Host>> {
        Arc::clone(&self.host)
    }

    /// Get current client statistics.
    pub async fn stats(&self) -> ClientStats {
        self.stats.read().await.clone()
    }

    /// Resolve `data` for `name` through `resolver`.
    #[instrument(skip(self, data), fields(request_id = %Uuid::new_v4()))]
    pub async fn resolve(
        &self,
        resolver: Address,
        name: &str,
        data: Bytes,
    ) -> Result<Bytes, ClientError> {
        self.stats.write().await.resolutions += 1;

        let outcome = match dns_encode(name) {
            Ok(wire) => {
                let call = ResolverCall::Resolve {
                    name: Bytes::from(wire),
                    data,
                };
                self.call_with_lookups(resolver, call).await
            }
            Err(e) => Err(e.into()),
        };

        let mut stats = self.stats.write().await;
        match &outcome {
            Ok(result) => {
                stats.successful += 1;
                info!(bytes = result.len(), "name resolved");
            }
            Err(e) => {
                stats.failed += 1;
                warn!(error = %e, "resolution failed");
            }
        }
        outcome
    }

    /// Resolve the `addr(bytes32)` record of `name`.
    pub async fn resolve_addr(&self, resolver: Address, name: &str) -> Result<Address, ClientError> {
        let data = encode_addr_call(namehash(name));
        let result = self.resolve(resolver, name, data).await?;
        decode_addr_result(result.as_slice())
            .map_err(|e| ClientError::InvalidGatewayResponse(e.to_string()))
    }

    /// Resolve the `text(bytes32,string)` record `key` of `name`.
    pub async fn resolve_text(
        &self,
        resolver: Address,
        name: &str,
        key: &str,
    ) -> Result<String, ClientError> {
        let data = encode_text_call(namehash(name), key);
        let result = self.resolve(resolver, name, data).await?;
        decode_text_result(result.as_slice())
            .map_err(|e| ClientError::InvalidGatewayResponse(e.to_string()))
    }

    async fn call_with_lookups(
        &self,
        resolver: Address,
        mut call: ResolverCall,
    ) -> Result<Bytes, ClientError> {
        let mut followed = 0;

        loop {
            let output = self.host.read().await.call(Address::ZERO, resolver, &call)?;
            let lookup = match output {
                CallOutput::Bytes(result) => return Ok(result),
                CallOutput::Lookup(lookup) => lookup,
                other => return Err(ClientError::UnexpectedOutput(other.variant().to_string())),
            };

            if lookup.sender != resolver {
                return Err(ClientError::SenderMismatch {
                    expected: resolver,
                    actual: lookup.sender,
                });
            }
            if lookup.callback != RESOLVE_WITH_PROOF_SELECTOR {
                return Err(ClientError::UnknownCallback(lookup.callback));
            }
            if followed >= self.config.max_lookups {
                return Err(ClientError::TooManyLookups {
                    max: self.config.max_lookups,
                });
            }
            followed += 1;
            self.stats.write().await.lookups += 1;

            let response = self.fetch(&lookup).await?;
            call = ResolverCall::ResolveWithProof {
                response,
                extra_data: lookup.extra_data,
            };
        }
    }

    /// Query the lookup's gateways in order until one answers.
    async fn fetch(&self, lookup: &OffchainLookup) -> Result<Bytes, ClientError> {
        let sender = lookup.sender.to_hex();
        let data = lookup.call_data.to_hex();
        let timeout = Duration::from_millis(self.config.gateway_timeout_ms);
        let mut attempts = 0;

        for template in &lookup.urls {
            attempts += 1;
            let request = build_gateway_request(template, &sender, &data);
            let url = request.url.clone();
            debug!(%url, method = ?request.method, "querying gateway");
            self.stats.write().await.gateway_requests += 1;

            let response = match tokio::time::timeout(timeout, self.transport.send(request)).await
            {
                Ok(Ok(response)) => response,
                Ok(Err(e)) => {
                    warn!(%url, error = %e, "gateway unreachable");
                    self.stats.write().await.gateway_failures += 1;
                    continue;
                }
                Err(_) => {
                    warn!(%url, timeout_ms = self.config.gateway_timeout_ms, "gateway timed out");
                    self.stats.write().await.gateway_failures += 1;
                    continue;
                }
            };

            if response.body.len() > self.config.max_response_bytes {
                return Err(ClientError::ResponseTooLarge {
                    size: response.body.len(),
                    max: self.config.max_response_bytes,
                });
            }

            match response.status {
                200..=299 => {
                    return serde_json::from_str::<GatewayData>(&response.body)
                        .map(|reply| reply.data)
                        .map_err(|e| ClientError::InvalidGatewayResponse(e.to_string()));
                }
                400..=499 => {
                    return Err(ClientError::GatewayRejected {
                        status: response.status,
                        message: error_message(&response.body),
                    });
                }
                status => {
                    warn!(%url, status, "gateway error, trying next url");
                    self.stats.write().await.gateway_failures += 1;
                }
            }
        }

        Err(ClientError::AllGatewaysFailed { attempts })
    }
}

#[async_trait]
impl<T: GatewayTransport> NameResolution for CcipReadService<T> {
    async fn resolve(
        &self,
        resolver: Address,
        name: &str,
        data: Bytes,
    ) -> Result<Bytes, ClientError> {
        CcipReadService::resolve(self, resolver, name, data).await
    }

    async fn resolve_addr(&self, resolver: Address, name: &str) -> Result<Address, ClientError> {
        CcipReadService::resolve_addr(self, resolver, name).await
    }

    async fn resolve_text(
        &self,
        resolver: Address,
        name: &str,
        key: &str,
    ) -> Result<String, ClientError> {
        CcipReadService::resolve_text(self, resolver, name, key).await
    }
}
