//! Chain-facing runtime.
//!
//! The runtime keeps the current tip in a [`StateRepository`], derives block
//! seeds from the genesis seed, and applies blocks strictly in index order.

use game_core::{GameEnv, TablesSnapshot, WorldState, compute_seed};

use crate::block::{Block, Transaction};
use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::executor::{BlockExecutor, BlockOutcome};
use crate::repository::StateRepository;
use crate::utils::hash::short_state_hash;

/// Seed context for block seeds derived from the genesis seed.
const BLOCK_SEED_CONTEXT: u32 = 1;

/// Applies blocks on top of the snapshots held by `R`.
pub struct Runtime<R: StateRepository> {
    config: RuntimeConfig,
    tables: TablesSnapshot,
    repository: R,
}

impl<R: StateRepository> Runtime<R> {
    pub fn builder(repository: R) -> RuntimeBuilder<R> {
        RuntimeBuilder::new(repository)
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn tables(&self) -> &TablesSnapshot {
        &self.tables
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Index of the latest stored snapshot.
    pub fn tip(&self) -> Result<u64> {
        self.repository
            .latest()?
            .map(|(index, _)| index)
            .ok_or(RuntimeError::MissingState { block_index: 0 })
    }

    pub fn state_at(&self, block_index: u64) -> Result<WorldState> {
        self.repository
            .load(block_index)?
            .ok_or(RuntimeError::MissingState { block_index })
    }

    /// Seed for the block at `index`.
    pub fn block_seed(&self, index: u64) -> u64 {
        compute_seed(self.config.genesis_seed, index, 0, BLOCK_SEED_CONTEXT)
    }

    /// Builds the next block on top of the tip.
    pub fn propose(&self, transactions: Vec<Transaction>) -> Result<Block> {
        let index = self.tip()? + 1;
        Ok(Block {
            index,
            seed: self.block_seed(index),
            transactions,
        })
    }

    /// Executes `block` against the tip and stores the resulting snapshot.
    pub fn apply_block(&self, block: &Block) -> Result<BlockOutcome> {
        let tip = self.tip()?;
        let expected = tip + 1;
        if block.index != expected {
            return Err(RuntimeError::BlockOutOfOrder {
                expected,
                found: block.index,
            });
        }

        let state = self.state_at(tip)?;
        let env = GameEnv::new(&self.tables, &self.config.game_config);
        let outcome = BlockExecutor::new(env, &self.config).execute_block(&state, block)?;
        self.repository.save(block.index, &outcome.state)?;
        Ok(outcome)
    }
}

/// Builder for [`Runtime`].
pub struct RuntimeBuilder<R: StateRepository> {
    config: RuntimeConfig,
    tables: TablesSnapshot,
    genesis: Option<WorldState>,
    repository: R,
}

impl<R: StateRepository> RuntimeBuilder<R> {
    fn new(repository: R) -> Self {
        Self {
            config: RuntimeConfig::default(),
            tables: TablesSnapshot::default(),
            genesis: None,
            repository,
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn tables(mut self, tables: TablesSnapshot) -> Self {
        self.tables = tables;
        self
    }

    /// Snapshot stored at block 0 when the repository has none.
    pub fn genesis(mut self, state: WorldState) -> Self {
        self.genesis = Some(state);
        self
    }

    pub fn build(self) -> Result<Runtime<R>> {
        if !self.repository.exists(0) {
            let genesis = self.genesis.unwrap_or_default();
            tracing::info!(state = %short_state_hash(&genesis), "storing genesis snapshot");
            self.repository.save(0, &genesis)?;
        }

        Ok(Runtime {
            config: self.config,
            tables: self.tables,
            repository: self.repository,
        })
    }
}
