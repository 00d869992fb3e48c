//! In-memory StateRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use game_core::WorldState;

use super::{RepositoryError, Result, StateRepository};

/// In-memory implementation of StateRepository.
///
/// Snapshots share structure, so keeping one per block stays cheap.
#[derive(Debug, Default)]
pub struct InMemoryStateRepo {
    states: RwLock<BTreeMap<u64, WorldState>>,
}

impl InMemoryStateRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with `genesis` stored at block 0.
    pub fn with_genesis(genesis: WorldState) -> Self {
        Self {
            states: RwLock::new(BTreeMap::from([(0, genesis)])),
        }
    }
}

impl StateRepository for InMemoryStateRepo {
    fn save(&self, block_index: u64, state: &WorldState) -> Result<()> {
        let mut states = self
            .states
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        if states.contains_key(&block_index) {
            return Err(RepositoryError::AlreadyStored { block_index });
        }
        states.insert(block_index, state.clone());
        Ok(())
    }

    fn load(&self, block_index: u64) -> Result<Option<WorldState>> {
        let states = self
            .states
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(states.get(&block_index).cloned())
    }

    fn exists(&self, block_index: u64) -> bool {
        self.states
            .read()
            .map(|states| states.contains_key(&block_index))
            .unwrap_or(false)
    }

    fn list_indices(&self) -> Result<Vec<u64>> {
        let states = self
            .states
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(states.keys().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use game_core::Address;

    use super::*;

    #[test]
    fn snapshots_are_final() {
        let repo = InMemoryStateRepo::with_genesis(WorldState::new());
        let next = WorldState::new().with_state(Address::new([1; 20]), b"{}".to_vec());

        repo.save(1, &next).unwrap();
        assert!(matches!(
            repo.save(1, &WorldState::new()),
            Err(RepositoryError::AlreadyStored { block_index: 1 })
        ));
        assert_eq!(repo.load(1).unwrap(), Some(next.clone()));
        assert_eq!(repo.list_indices().unwrap(), vec![0, 1]);
        assert_eq!(repo.latest().unwrap(), Some((1, next)));
        assert!(!repo.exists(2));
    }
}
