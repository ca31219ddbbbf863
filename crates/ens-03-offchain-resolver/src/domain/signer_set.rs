//! # Signer Set
//!
//! Addresses trusted to sign gateway responses. Membership is O(1) through a
//! position index; removal swaps the last member into the vacated slot.

use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::collections::HashMap;

/// Per-address outcome of an add or remove batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerUpdate {
    pub address: Address,
    /// False when the address was already present (add) or absent (remove).
    pub applied: bool,
}

/// Deduplicated set of signer addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignerSet {
    members: Vec<Address>,
    index: HashMap<Address, usize>,
}

impl SignerSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, address: &Address) -> bool {
        self.index.contains_key(address)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Current members. Order is unspecified.
    #[must_use]
    pub fn members(&self) -> &[Address] {
        &self.members
    }

    /// Insert each address; duplicates within the batch or the set are no-ops.
    pub fn add(&mut self, addresses: &[Address]) -> Vec<SignerUpdate> {
        addresses
            .iter()
            .map(|&address| SignerUpdate {
                address,
                applied: self.insert(address),
            })
            .collect()
    }

    /// Remove each address; absent ones are no-ops.
    pub fn remove(&mut self, addresses: &[Address]) -> Vec<SignerUpdate> {
        addresses
            .iter()
            .map(|&address| SignerUpdate {
                address,
                applied: self.take(&address),
            })
            .collect()
    }

    fn insert(&mut self, address: Address) -> bool {
        if self.index.contains_key(&address) {
            return false;
        }
        self.index.insert(address, self.members.len());
        self.members.push(address);
        true
    }

    fn take(&mut self, address: &Address) -> bool {
        let Some(position) = self.index.remove(address) else {
            return false;
        };
        self.members.swap_remove(position);
        if let Some(moved) = self.members.get(position) {
            self.index.insert(*moved, position);
        }
        true
    }
}

impl FromIterator<Address> for SignerSet {
    fn from_iter<I: IntoIterator<Item = Address>>(iter: I) -> Self {
        let mut set = Self::new();
        for address in iter {
            set.insert(address);
        }
        set
    }
}
