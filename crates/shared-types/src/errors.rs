//! # Error Types
//!
//! Parsing errors for the shared value objects.

use thiserror::Error;

/// Errors raised when parsing value objects from text or slices.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The input was not valid hexadecimal.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// The decoded input had the wrong number of bytes.
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// ABI decoding failed.
    #[error("abi decode failed: {0}")]
    Abi(String),
}
