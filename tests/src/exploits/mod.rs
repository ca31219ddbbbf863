//! # Exploit Simulations
//!
//! Attacks a hostile gateway, relayer or account could try.
//!
//! - `forged_responses`: replay, tampering, malleability, stale answers
//! - `governance`: takeover of roles, initializers and upgrades

pub mod forged_responses;
pub mod governance;
