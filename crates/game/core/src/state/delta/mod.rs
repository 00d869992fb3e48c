//! Content diff between two snapshots.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::address::Address;
use crate::state::{Currency, WorldState};

/// Everything an action wrote, as final values.
///
/// Records are never deleted, so a delta only contains insertions and
/// overwrites. Maps are ordered, making equal deltas byte-for-byte comparable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateDelta {
    pub updated_states: BTreeMap<Address, Arc<[u8]>>,
    pub updated_balances: BTreeMap<(Address, Currency), u128>,
    pub updated_supplies: BTreeMap<Currency, u128>,
}

impl StateDelta {
    /// Creates a delta by comparing two snapshots.
    ///
    /// Maps still shared between `before` and `after` are skipped entirely;
    /// otherwise every entry of `after` is compared with `before`.
    pub fn from_states(before: &WorldState, after: &WorldState) -> Self {
        Self {
            updated_states: diff_map(before.raw_states(), after.raw_states()),
            updated_balances: diff_map(before.raw_balances(), after.raw_balances()),
            updated_supplies: diff_map(before.raw_supplies(), after.raw_supplies()),
        }
    }

    /// Returns true if no state changes occurred (no-op action).
    pub fn is_empty(&self) -> bool {
        self.updated_states.is_empty()
            && self.updated_balances.is_empty()
            && self.updated_supplies.is_empty()
    }

    pub fn touches(&self, address: &Address) -> bool {
        self.updated_states.contains_key(address)
            || self
                .updated_balances
                .keys()
                .any(|(account, _)| account == address)
    }
}

fn diff_map<K, V>(before: &Arc<BTreeMap<K, V>>, after: &Arc<BTreeMap<K, V>>) -> BTreeMap<K, V>
where
    K: Ord + Clone,
    V: PartialEq + Clone,
{
    if Arc::ptr_eq(before, after) {
        return BTreeMap::new();
    }
    after
        .iter()
        .filter(|(key, value)| before.get(*key) != Some(*value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
