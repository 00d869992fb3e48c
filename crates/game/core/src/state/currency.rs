//! Fungible currencies and amounts.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::address::Address;

/// A fungible currency tracked by the balance ledger.
///
/// Only addresses listed in `minters` may create new supply. A currency with
/// no minters has a fixed supply.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Currency {
    ticker: String,
    decimal_places: u8,
    minters: BTreeSet<Address>,
}

impl Currency {
    pub fn new(ticker: impl Into<String>, decimal_places: u8) -> Self {
        Self {
            ticker: ticker.into(),
            decimal_places,
            minters: BTreeSet::new(),
        }
    }

    pub fn with_minter(mut self, minter: Address) -> Self {
        self.minters.insert(minter);
        self
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn decimal_places(&self) -> u8 {
        self.decimal_places
    }

    pub fn is_minter(&self, address: &Address) -> bool {
        self.minters.contains(address)
    }

    /// Feeds a canonical encoding of this currency into a state-root hasher.
    pub(crate) fn hash_into(&self, hasher: &mut Sha256) {
        hasher.update((self.ticker.len() as u64).to_le_bytes());
        hasher.update(self.ticker.as_bytes());
        hasher.update([self.decimal_places]);
        hasher.update((self.minters.len() as u64).to_le_bytes());
        for minter in &self.minters {
            hasher.update(minter.as_bytes());
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ticker)
    }
}

/// An amount of a specific currency, in its smallest unit.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FungibleAssetValue {
    pub currency: Currency,
    pub amount: u128,
}

impl FungibleAssetValue {
    pub fn new(currency: Currency, amount: u128) -> Self {
        Self { currency, amount }
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }
}

impl fmt::Display for FungibleAssetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}
