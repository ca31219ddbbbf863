//! # ENS Offchain Resolver Test Suite
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Deployed resolvers, in-memory gateway
//! ├── integration/      # End-to-end flows across crates
//! └── exploits/         # Attacks on signatures and governance
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ens-tests
//! cargo test -p ens-tests integration::
//! cargo test -p ens-tests exploits::
//!
//! # Benchmarks
//! cargo bench -p ens-tests
//! ```

#![allow(dead_code)]

pub mod exploits;
