//! Immutable world state snapshots.
//!
//! A [`WorldState`] is a persistent value: cloning is O(1) because every map
//! sits behind an [`Arc`], and the first write to a shared map clones it
//! (values themselves stay shared). A snapshot handed to an action is never
//! observed to change; the action works on its own copy and either returns it
//! or drops it.
pub mod codec;
pub mod currency;
pub mod delta;
pub mod error;
pub mod types;

use std::collections::BTreeMap;
use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::address::Address;

pub use currency::{Currency, FungibleAssetValue};
pub use delta::StateDelta;
pub use error::StateError;
pub use types::{
    AgentState, ArenaParticipant, ArenaParticipants, AvatarState, Costume, DelegateeStatus,
    Equipment, FungibleId, Grade, Guild, GuildParticipant, Inventory, InventoryEntry, Item,
    ItemBase, ItemOption, ItemSubType, ItemType, Material, NonFungibleId, RecipeRef, StatType,
    Validator, ValidatorDelegatee, ValidatorSet,
};

/// Canonical snapshot of the ledger: raw records plus the balance ledger.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorldState {
    states: Arc<BTreeMap<Address, Arc<[u8]>>>,
    balances: Arc<BTreeMap<(Address, Currency), u128>>,
    supplies: Arc<BTreeMap<Currency, u128>>,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== raw records =====

    pub fn get_state(&self, address: &Address) -> Option<&[u8]> {
        self.states.get(address).map(|bytes| bytes.as_ref())
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.states.contains_key(address)
    }

    /// Writes raw bytes at `address`, copying the record map if it is shared.
    pub fn set_state(&mut self, address: Address, bytes: Vec<u8>) {
        Arc::make_mut(&mut self.states).insert(address, bytes.into());
    }

    /// Returns a new snapshot with `address` set, leaving `self` untouched.
    pub fn with_state(&self, address: Address, bytes: Vec<u8>) -> Self {
        let mut next = self.clone();
        next.set_state(address, bytes);
        next
    }

    pub fn states(&self) -> impl Iterator<Item = (&Address, &[u8])> {
        self.states
            .iter()
            .map(|(address, bytes)| (address, bytes.as_ref()))
    }

    // ===== balance ledger =====

    pub fn balance(&self, account: &Address, currency: &Currency) -> FungibleAssetValue {
        let amount = self
            .balances
            .get(&(*account, currency.clone()))
            .copied()
            .unwrap_or(0);
        FungibleAssetValue::new(currency.clone(), amount)
    }

    pub fn total_supply(&self, currency: &Currency) -> u128 {
        self.supplies.get(currency).copied().unwrap_or(0)
    }

    /// Sum of every account balance for `currency`.
    pub fn circulating(&self, currency: &Currency) -> u128 {
        self.balances
            .iter()
            .filter(|((_, held), _)| held == currency)
            .map(|(_, amount)| *amount)
            .sum()
    }

    pub fn balances(&self) -> impl Iterator<Item = (&Address, &Currency, u128)> {
        self.balances
            .iter()
            .map(|((account, currency), amount)| (account, currency, *amount))
    }

    /// Moves `value` from `sender` to `recipient`.
    ///
    /// Total supply is unchanged. A self-transfer only checks the balance.
    pub fn transfer(
        &mut self,
        sender: Address,
        recipient: Address,
        value: &FungibleAssetValue,
    ) -> Result<(), StateError> {
        let currency = &value.currency;
        let sender_balance = self.balance(&sender, currency).amount;
        let remaining =
            sender_balance
                .checked_sub(value.amount)
                .ok_or_else(|| StateError::InsufficientFunds {
                    account: sender,
                    ticker: currency.ticker().to_owned(),
                    balance: sender_balance,
                    required: value.amount,
                })?;

        if sender == recipient || value.is_zero() {
            return Ok(());
        }

        let credited = self
            .balance(&recipient, currency)
            .amount
            .checked_add(value.amount)
            .ok_or_else(|| StateError::BalanceOverflow {
                account: recipient,
                ticker: currency.ticker().to_owned(),
            })?;

        let balances = Arc::make_mut(&mut self.balances);
        balances.insert((sender, currency.clone()), remaining);
        balances.insert((recipient, currency.clone()), credited);
        Ok(())
    }

    /// Creates new supply for `recipient`. Only a currency minter may mint.
    pub fn mint(
        &mut self,
        authority: Address,
        recipient: Address,
        value: &FungibleAssetValue,
    ) -> Result<(), StateError> {
        let currency = &value.currency;
        if !currency.is_minter(&authority) {
            return Err(StateError::NotMinter {
                signer: authority,
                ticker: currency.ticker().to_owned(),
            });
        }

        let supply = self
            .total_supply(currency)
            .checked_add(value.amount)
            .ok_or_else(|| StateError::SupplyOverflow {
                ticker: currency.ticker().to_owned(),
            })?;
        // supply bounds every balance, so the credit cannot overflow
        let credited = self.balance(&recipient, currency).amount + value.amount;

        Arc::make_mut(&mut self.supplies).insert(currency.clone(), supply);
        Arc::make_mut(&mut self.balances).insert((recipient, currency.clone()), credited);
        Ok(())
    }

    // ===== commitments =====

    /// SHA-256 commitment over the full canonical content of the snapshot.
    ///
    /// Maps iterate in key order, so two snapshots with equal content always
    /// commit to the same root regardless of the order writes happened in.
    pub fn state_root(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();

        hasher.update(b"states");
        for (address, bytes) in self.states.iter() {
            hasher.update(address.as_bytes());
            hasher.update((bytes.len() as u64).to_le_bytes());
            hasher.update(bytes);
        }

        hasher.update(b"balances");
        for ((account, currency), amount) in self.balances.iter() {
            hasher.update(account.as_bytes());
            currency.hash_into(&mut hasher);
            hasher.update(amount.to_le_bytes());
        }

        hasher.update(b"supplies");
        for (currency, supply) in self.supplies.iter() {
            currency.hash_into(&mut hasher);
            hasher.update(supply.to_le_bytes());
        }

        hasher.finalize().into()
    }

    /// Changes between `before` and `self`.
    pub fn diff(&self, before: &WorldState) -> StateDelta {
        StateDelta::from_states(before, self)
    }

    pub(crate) fn raw_states(&self) -> &Arc<BTreeMap<Address, Arc<[u8]>>> {
        &self.states
    }

    pub(crate) fn raw_balances(&self) -> &Arc<BTreeMap<(Address, Currency), u128>> {
        &self.balances
    }

    pub(crate) fn raw_supplies(&self) -> &Arc<BTreeMap<Currency, u128>> {
        &self.supplies
    }
}

impl AsRef<WorldState> for WorldState {
    fn as_ref(&self) -> &WorldState {
        self
    }
}

impl AsMut<WorldState> for WorldState {
    fn as_mut(&mut self) -> &mut WorldState {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gold(minter: Address) -> Currency {
        Currency::new("GOLD", 2).with_minter(minter)
    }

    fn account(byte: u8) -> Address {
        Address::new([byte; 20])
    }

    #[test]
    fn set_does_not_mutate_previous_snapshot() {
        let before = WorldState::new().with_state(account(1), vec![1]);
        let after = before.with_state(account(1), vec![2]);

        assert_eq!(before.get_state(&account(1)), Some(&[1u8][..]));
        assert_eq!(after.get_state(&account(1)), Some(&[2u8][..]));
        assert_ne!(before.state_root(), after.state_root());
    }

    #[test]
    fn clone_then_write_leaves_original_intact() {
        let original = WorldState::new().with_state(account(1), vec![1]);
        let mut copy = original.clone();
        copy.set_state(account(2), vec![2]);

        assert!(!original.contains(&account(2)));
        assert!(copy.contains(&account(2)));
    }

    #[test]
    fn mint_and_transfer_conserve_supply() {
        let minter = account(9);
        let currency = gold(minter);
        let mut state = WorldState::new();

        state
            .mint(minter, account(1), &FungibleAssetValue::new(currency.clone(), 100))
            .unwrap();
        state
            .transfer(account(1), account(2), &FungibleAssetValue::new(currency.clone(), 40))
            .unwrap();

        assert_eq!(state.balance(&account(1), &currency).amount, 60);
        assert_eq!(state.balance(&account(2), &currency).amount, 40);
        assert_eq!(state.total_supply(&currency), 100);
        assert_eq!(state.circulating(&currency), 100);
    }

    #[test]
    fn transfer_rejects_overdraft_without_side_effects() {
        let minter = account(9);
        let currency = gold(minter);
        let mut state = WorldState::new();
        state
            .mint(minter, account(1), &FungibleAssetValue::new(currency.clone(), 10))
            .unwrap();
        let before = state.clone();

        let error = state
            .transfer(account(1), account(2), &FungibleAssetValue::new(currency.clone(), 11))
            .unwrap_err();

        assert!(matches!(
            error,
            StateError::InsufficientFunds {
                balance: 10,
                required: 11,
                ..
            }
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn only_minters_mint() {
        let currency = gold(account(9));
        let mut state = WorldState::new();
        let error = state
            .mint(account(1), account(1), &FungibleAssetValue::new(currency.clone(), 1))
            .unwrap_err();
        assert!(matches!(error, StateError::NotMinter { .. }));
        assert_eq!(state.total_supply(&currency), 0);
    }

    #[test]
    fn state_root_ignores_write_order() {
        let a = WorldState::new()
            .with_state(account(1), vec![1])
            .with_state(account(2), vec![2]);
        let b = WorldState::new()
            .with_state(account(2), vec![2])
            .with_state(account(1), vec![1]);
        assert_eq!(a, b);
        assert_eq!(a.state_root(), b.state_root());
    }
}
