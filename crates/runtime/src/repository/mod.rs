//! Snapshot persistence for the runtime.
//!
//! Snapshots are keyed by the index of the block that produced them; the
//! genesis snapshot sits at index 0.
mod error;
mod memory;

pub use error::{RepositoryError, Result};
pub use memory::InMemoryStateRepo;

use game_core::WorldState;

/// Repository for world state snapshots indexed by block.
pub trait StateRepository: Send + Sync {
    /// Stores the snapshot produced by `block_index`. Stored snapshots are final.
    fn save(&self, block_index: u64, state: &WorldState) -> Result<()>;

    fn load(&self, block_index: u64) -> Result<Option<WorldState>>;

    fn exists(&self, block_index: u64) -> bool;

    /// All stored block indices, ascending.
    fn list_indices(&self) -> Result<Vec<u64>>;

    /// Highest stored block index and its snapshot.
    fn latest(&self) -> Result<Option<(u64, WorldState)>> {
        let Some(&index) = self.list_indices()?.last() else {
            return Ok(None);
        };
        Ok(self.load(index)?.map(|state| (index, state)))
    }
}
