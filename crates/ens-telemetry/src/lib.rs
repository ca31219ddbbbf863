//! # ENS Telemetry
//!
//! Structured logging for the resolver crates. Every crate logs through
//! `tracing`; binaries and tests call [`init_tracing`] once to install a
//! subscriber.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ens_telemetry::{init_tracing, TelemetryConfig};
//!
//! fn main() {
//!     init_tracing(&TelemetryConfig::from_env()).expect("failed to init logging");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ENS_SERVICE_NAME` | `ens-offchain-resolver` | Service name in logs |
//! | `ENS_LOG_LEVEL` | `info` | Log level filter |
//! | `ENS_JSON_LOGS` | `false` | JSON output (defaults on in containers) |

mod config;

pub use config::TelemetryConfig;

use std::sync::Once;
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("invalid log filter: {0}")]
    Filter(String),

    #[error("failed to install subscriber: {0}")]
    Subscriber(String),
}

/// Install the global subscriber described by `config`.
///
/// The filter comes from `config.log_level` alone; `RUST_LOG` is only a
/// fallback inside [`TelemetryConfig::from_env`]. Fails if a global
/// subscriber is already set.
pub fn init_tracing(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = build_filter(config)?;

    if config.json_logs {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| TelemetryError::Subscriber(e.to_string()))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::Subscriber(e.to_string()))?;
    }

    tracing::info!(service = %config.service_name, json = config.json_logs, "logging initialized");
    Ok(())
}

fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.log_level).map_err(|e| TelemetryError::Filter(e.to_string()))
}

/// Test-writer subscriber; safe to call from every test.
pub fn init_test_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}
