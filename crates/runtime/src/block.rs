//! Blocks of signed actions as the host delivers them.

use serde::{Deserialize, Serialize};

use game_core::{Address, PlainAction, compute_actions_root};

use crate::error::{Result, RuntimeError};

/// A signed action. The signer is assumed to be verified by the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub signer: Address,
    pub action: PlainAction,
    /// Overrides `RuntimeConfig::gas_limit` when set.
    pub gas_limit: Option<u64>,
}

impl Transaction {
    pub fn new(signer: Address, action: PlainAction) -> Self {
        Self {
            signer,
            action,
            gas_limit: None,
        }
    }

    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    /// Block-level seed; per-action seeds are derived from it.
    pub seed: u64,
    pub transactions: Vec<Transaction>,
}

impl Block {
    pub fn new(index: u64, seed: u64) -> Self {
        Self {
            index,
            seed,
            transactions: Vec::new(),
        }
    }

    pub fn with_transaction(mut self, transaction: Transaction) -> Self {
        self.transactions.push(transaction);
        self
    }

    /// Commitment over the block's actions in application order.
    pub fn actions_root(&self) -> Result<[u8; 32]> {
        let actions: Vec<PlainAction> = self
            .transactions
            .iter()
            .map(|transaction| transaction.action.clone())
            .collect();
        Ok(compute_actions_root(&actions)?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|error| RuntimeError::Encoding(error.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|error| RuntimeError::Encoding(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use game_core::Payload;

    use super::*;

    #[test]
    fn actions_root_follows_transaction_order() {
        let first = PlainAction::new("join_guild", Payload::new().with("guild", Address::ZERO));
        let second = PlainAction::new("make_guild", Payload::new().with("validator", Address::ZERO));

        let forward = Block::new(1, 7)
            .with_transaction(Transaction::new(Address::ZERO, first.clone()))
            .with_transaction(Transaction::new(Address::ZERO, second.clone()));
        let reversed = Block::new(1, 7)
            .with_transaction(Transaction::new(Address::ZERO, second))
            .with_transaction(Transaction::new(Address::ZERO, first));

        assert_ne!(forward.actions_root().unwrap(), reversed.actions_root().unwrap());
        assert_eq!(Block::from_bytes(&forward.to_bytes().unwrap()).unwrap(), forward);
    }
}
