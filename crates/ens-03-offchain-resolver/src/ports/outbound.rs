//! # Outbound Ports (Driven Ports / SPI)
//!
//! What the lookup client needs from the outside world: a way to reach
//! CCIP-Read gateways over HTTP.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A fully templated request to one gateway URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayRequest {
    pub method: HttpMethod,
    pub url: String,
    /// JSON body for POST requests.
    pub body: Option<String>,
}

/// Raw gateway reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayResponse {
    pub status: u16,
    pub body: String,
}

/// Failures below the HTTP status level.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connection(String),
    #[error("request timed out")]
    Timeout,
    #[error("transport error: {0}")]
    Other(String),
}

/// HTTP transport to CCIP-Read gateways.
#[async_trait]
pub trait GatewayTransport: Send + Sync {
    async fn send(&self, request: GatewayRequest) -> Result<GatewayResponse, TransportError>;
}
