//! # Domain Layer
//!
//! Pure cryptographic logic with no I/O dependencies.
//! This is the inner layer of the hexagonal architecture.

pub mod digest;
pub mod ecdsa;
pub mod entities;
pub mod errors;
