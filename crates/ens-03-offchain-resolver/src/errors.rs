//! # Error Types
//!
//! All error types for the resolver contract model and the lookup client.

use ens_01_dns_codec::DnsError;
use ens_02_signature_verification::SignatureError;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Selector, Timestamp};
use thiserror::Error;

// =============================================================================
// ERROR KINDS
// =============================================================================

/// Coarse classification clients branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Wrong caller for a role-gated operation.
    Authorization,
    /// Input rejected before any state is touched.
    Validation,
    /// A signed response outlived its `expires`.
    Expiry,
    /// A well-formed signature from a key outside the signer set.
    Trust,
    /// Operation not valid in the contract's current state or deployment.
    State,
}

// =============================================================================
// RESOLVER ERRORS
// =============================================================================

/// Errors raised by resolver calls. Every one reverts the whole call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolverError {
    #[error("caller {caller} is not the owner")]
    NotOwner { caller: Address },

    #[error("caller {caller} is not the signer manager")]
    NotSignerManager { caller: Address },

    #[error("caller {caller} is not the gateway manager")]
    NotGatewayManager { caller: Address },

    /// A role or ownership target was the zero address.
    #[error("zero address not allowed")]
    ZeroAddress,

    #[error("invalid signature: {0}")]
    InvalidSignature(SignatureError),

    #[error("malformed gateway response: {0}")]
    MalformedResponse(String),

    #[error("signature expired at {expires} (now {now})")]
    SignatureExpired { expires: Timestamp, now: Timestamp },

    /// The signature is valid but the signer is not registered.
    #[error("signer {signer} is not authorized")]
    UnauthorizedSigner { signer: Address },

    #[error("contract is already initialized")]
    AlreadyInitialized,

    /// Plain `upgradeTo` is permanently disabled; use `upgradeToAndCall`.
    #[error("upgradeTo is disabled, use upgradeToAndCall")]
    UpgradeToDisabled,

    /// The call must run through a proxy pointing at the executing code.
    #[error("must be called through delegatecall")]
    NotDelegated,

    #[error("{0} is not a proxiable implementation")]
    InvalidImplementation(Address),

    /// The entry point does not exist under the deployed role model.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    #[error("no code at {0}")]
    NoCode(Address),
}

impl ResolverError {
    /// Stable identifier for clients and tests.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotOwner { .. } => "NotOwner",
            Self::NotSignerManager { .. } => "NotSignerManager",
            Self::NotGatewayManager { .. } => "NotGatewayManager",
            Self::ZeroAddress => "ZeroAddress",
            Self::InvalidSignature(_) => "InvalidSignature",
            Self::MalformedResponse(_) => "MalformedResponse",
            Self::SignatureExpired { .. } => "SignatureExpired",
            Self::UnauthorizedSigner { .. } => "UnauthorizedSigner",
            Self::AlreadyInitialized => "AlreadyInitialized",
            Self::UpgradeToDisabled => "UpgradeToDisabled",
            Self::NotDelegated => "NotDelegated",
            Self::InvalidImplementation(_) => "InvalidImplementation",
            Self::UnsupportedOperation(_) => "UnsupportedOperation",
            Self::NoCode(_) => "NoCode",
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotOwner { .. } | Self::NotSignerManager { .. } | Self::NotGatewayManager { .. } => {
                ErrorKind::Authorization
            }
            Self::ZeroAddress | Self::InvalidSignature(_) | Self::MalformedResponse(_) => {
                ErrorKind::Validation
            }
            Self::SignatureExpired { .. } => ErrorKind::Expiry,
            Self::UnauthorizedSigner { .. } => ErrorKind::Trust,
            Self::AlreadyInitialized
            | Self::UpgradeToDisabled
            | Self::NotDelegated
            | Self::InvalidImplementation(_)
            | Self::UnsupportedOperation(_)
            | Self::NoCode(_) => ErrorKind::State,
        }
    }
}

impl From<SignatureError> for ResolverError {
    fn from(err: SignatureError) -> Self {
        match err {
            SignatureError::Expired { expires, now } => Self::SignatureExpired { expires, now },
            SignatureError::MalformedResponse(reason) => Self::MalformedResponse(reason),
            other => Self::InvalidSignature(other),
        }
    }
}

// =============================================================================
// CLIENT ERRORS
// =============================================================================

/// Errors raised while driving a CCIP-Read resolution from the client side.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// The resolver reverted.
    #[error("resolver error: {0}")]
    Resolver(#[from] ResolverError),

    #[error("dns encoding failed: {0}")]
    Dns(#[from] DnsError),

    /// `OffchainLookup.sender` does not match the contract that was called.
    #[error("lookup sender {actual} does not match resolver {expected}")]
    SenderMismatch { expected: Address, actual: Address },

    /// The callback selector is not one this client knows how to call.
    #[error("unknown callback selector {0}")]
    UnknownCallback(Selector),

    /// A gateway answered with a 4xx status; remaining URLs are not tried.
    #[error("gateway rejected request with status {status}: {message}")]
    GatewayRejected { status: u16, message: String },

    #[error("all gateways failed after {attempts} attempts")]
    AllGatewaysFailed { attempts: usize },

    #[error("invalid gateway response: {0}")]
    InvalidGatewayResponse(String),

    #[error("gateway response of {size} bytes exceeds limit of {max}")]
    ResponseTooLarge { size: usize, max: usize },

    /// The resolver kept answering with further lookups.
    #[error("exceeded {max} chained lookups")]
    TooManyLookups { max: usize },

    /// The resolver returned an output variant the client did not expect.
    #[error("unexpected resolver output: {0}")]
    UnexpectedOutput(String),
}
