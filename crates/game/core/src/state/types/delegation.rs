//! Validator delegation and guild records.
//!
//! Guilds delegate to validators. Neither record embeds the other: a guild
//! stores its validator's address and a delegatee stores the addresses of the
//! guilds bonded to it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::state::codec::{block_index, optional_block_index};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum DelegateeStatus {
    Active,
    Inactive,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Validator {
    pub address: Address,
    pub power: u64,
}

impl Validator {
    pub fn new(address: Address, power: u64) -> Self {
        Self { address, power }
    }
}

/// Validator set as last reported by the host, sorted by address.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorSet {
    #[serde(default)]
    pub validators: Vec<Validator>,
}

impl ValidatorSet {
    pub fn new(mut validators: Vec<Validator>) -> Self {
        validators.sort();
        Self { validators }
    }

    pub fn addresses(&self) -> BTreeSet<Address> {
        self.validators
            .iter()
            .map(|validator| validator.address)
            .collect()
    }

    pub fn power_of(&self, address: &Address) -> Option<u64> {
        self.validators
            .iter()
            .find(|validator| &validator.address == address)
            .map(|validator| validator.power)
    }
}

/// Activation state machine for one validator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorDelegatee {
    pub validator: Address,
    pub status: DelegateeStatus,
    #[serde(default)]
    pub power: u64,
    /// Guild addresses bonded to this validator.
    #[serde(default)]
    pub delegators: BTreeSet<Address>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "optional_block_index"
    )]
    pub activated_at: Option<u64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "optional_block_index"
    )]
    pub deactivated_at: Option<u64>,
}

impl ValidatorDelegatee {
    pub fn new(validator: Address) -> Self {
        Self {
            validator,
            status: DelegateeStatus::Inactive,
            power: 0,
            delegators: BTreeSet::new(),
            activated_at: None,
            deactivated_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == DelegateeStatus::Active
    }

    /// Inactive -> Active. Returns false if already active.
    pub fn activate(&mut self, power: u64, block_index: u64) -> bool {
        if self.is_active() {
            return false;
        }
        self.status = DelegateeStatus::Active;
        self.power = power;
        self.activated_at = Some(block_index);
        true
    }

    /// Active -> Inactive. Returns false if already inactive.
    pub fn deactivate(&mut self, block_index: u64) -> bool {
        if !self.is_active() {
            return false;
        }
        self.status = DelegateeStatus::Inactive;
        self.deactivated_at = Some(block_index);
        true
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guild {
    pub address: Address,
    pub master: Address,
    pub validator: Address,
    #[serde(default)]
    pub members: BTreeSet<Address>,
    #[serde(with = "block_index")]
    pub created_at: u64,
}

/// Membership of one agent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildParticipant {
    pub agent: Address,
    pub guild: Address,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_is_monotone() {
        let mut delegatee = ValidatorDelegatee::new(Address::ZERO);
        assert!(!delegatee.deactivate(1));
        assert!(delegatee.activate(10, 2));
        assert!(!delegatee.activate(10, 3));
        assert_eq!(delegatee.activated_at, Some(2));
        assert!(delegatee.deactivate(4));
        assert!(!delegatee.is_active());
        assert!(delegatee.activate(5, 6));
        assert_eq!(delegatee.activated_at, Some(6));
        assert_eq!(delegatee.deactivated_at, Some(4));
    }

    #[test]
    fn validator_set_is_sorted() {
        let high = Address::new([9; 20]);
        let low = Address::new([1; 20]);
        let set = ValidatorSet::new(vec![Validator::new(high, 1), Validator::new(low, 2)]);
        assert_eq!(set.validators[0].address, low);
        assert_eq!(set.power_of(&high), Some(1));
    }
}
