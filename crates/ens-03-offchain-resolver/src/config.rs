//! Resolver deployment and lookup client configuration from environment variables.

use crate::domain::{InitParams, RoleModel};
use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::env;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

// =============================================================================
// RESOLVER
// =============================================================================

/// What a new resolver deployment is initialized with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Gateway URL template with `{sender}` / `{data}` placeholders.
    pub gateway_url: String,
    /// Initial signer set.
    pub signers: Vec<Address>,
    pub role_model: RoleModel,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            gateway_url: "http://localhost:8080/{sender}/{data}.json".to_string(),
            signers: Vec::new(),
            role_model: RoleModel::Delegated,
        }
    }
}

impl ResolverConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ENS_GATEWAY_URL`: gateway URL template (default: http://localhost:8080/{sender}/{data}.json)
    /// - `ENS_SIGNERS`: comma-separated hex addresses (default: none)
    /// - `ENS_ROLE_MODEL`: `simple` or `delegated` (default: delegated)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let signers = match lookup("ENS_SIGNERS") {
            Some(list) => parse_signers(&list)?,
            None => defaults.signers,
        };

        let role_model = match lookup("ENS_ROLE_MODEL") {
            Some(model) => model.parse().map_err(|reason| ConfigError::Invalid {
                key: "ENS_ROLE_MODEL",
                reason,
            })?,
            None => defaults.role_model,
        };

        Ok(Self {
            gateway_url: lookup("ENS_GATEWAY_URL").unwrap_or(defaults.gateway_url),
            signers,
            role_model,
        })
    }

    /// Initialization parameters. Under `Delegated` both managers start as
    /// `owner` and can be reassigned afterwards.
    #[must_use]
    pub fn init_params(&self, owner: Address) -> InitParams {
        match self.role_model {
            RoleModel::Simple => {
                InitParams::simple(self.gateway_url.clone(), self.signers.clone(), owner)
            }
            RoleModel::Delegated => InitParams::delegated(
                self.gateway_url.clone(),
                self.signers.clone(),
                owner,
                owner,
                owner,
            ),
        }
    }
}

fn parse_signers(list: &str) -> Result<Vec<Address>, ConfigError> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<Address>().map_err(|e| ConfigError::Invalid {
                key: "ENS_SIGNERS",
                reason: format!("{s}: {e}"),
            })
        })
        .collect()
}

// =============================================================================
// CLIENT
// =============================================================================

/// Limits for the CCIP-Read client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Per-request gateway timeout.
    pub gateway_timeout_ms: u64,
    /// Chained lookups allowed per resolution.
    pub max_lookups: usize,
    /// Largest gateway body accepted.
    pub max_response_bytes: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            gateway_timeout_ms: 10_000,
            max_lookups: 4,
            max_response_bytes: 1024 * 1024,
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ENS_GATEWAY_TIMEOUT_MS`: per-request timeout (default: 10000)
    /// - `ENS_MAX_LOOKUPS`: chained lookup bound (default: 4)
    /// - `ENS_MAX_RESPONSE_BYTES`: gateway body limit (default: 1 MiB)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            gateway_timeout_ms: parse_number(&lookup, "ENS_GATEWAY_TIMEOUT_MS")?
                .unwrap_or(defaults.gateway_timeout_ms),
            max_lookups: parse_number(&lookup, "ENS_MAX_LOOKUPS")?
                .unwrap_or(defaults.max_lookups),
            max_response_bytes: parse_number(&lookup, "ENS_MAX_RESPONSE_BYTES")?
                .unwrap_or(defaults.max_response_bytes),
        })
    }
}

fn parse_number<N>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<N>, ConfigError>
where
    N: FromStr<Err = ParseIntError>,
{
    lookup(key)
        .map(|value| {
            value.trim().parse().map_err(|e: ParseIntError| ConfigError::Invalid {
                key,
                reason: format!("{value}: {e}"),
            })
        })
        .transpose()
}
