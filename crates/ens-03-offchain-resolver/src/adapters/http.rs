//! # HTTP Gateway Transport
//!
//! `reqwest`-backed implementation of [`GatewayTransport`].

use crate::ports::outbound::{
    GatewayRequest, GatewayResponse, GatewayTransport, HttpMethod, TransportError,
};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::debug;

/// Gateway transport over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpGatewayTransport {
    client: Client,
}

impl HttpGatewayTransport {
    /// Create a transport whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        Self::from_builder(client_builder(timeout))
    }

    fn from_builder(builder: ClientBuilder) -> Result<Self, TransportError> {
        let client = builder
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;
        Ok(Self { client })
    }
}

fn client_builder(timeout: Duration) -> ClientBuilder {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(2)))
}

fn map_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection(err.to_string())
    } else {
        TransportError::Other(err.to_string())
    }
}

#[async_trait]
impl GatewayTransport for HttpGatewayTransport {
    async fn send(&self, request: GatewayRequest) -> Result<GatewayResponse, TransportError> {
        let builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self
                .client
                .post(&request.url)
                .header(CONTENT_TYPE, "application/json")
                .body(request.body.unwrap_or_default()),
        };

        let response = builder.send().await.map_err(map_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_error)?;
        debug!(url = %request.url, status, bytes = body.len(), "gateway replied");

        Ok(GatewayResponse { status, body })
    }
}
