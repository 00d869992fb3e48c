//! Runtime configuration.

use game_core::GameConfig;

/// Runtime configuration shared by the block executor and the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    /// Gas limit for transactions that do not carry their own.
    pub gas_limit: u64,
    pub max_actions_per_block: usize,
    /// Root from which block seeds are derived.
    pub genesis_seed: u64,
}

impl RuntimeConfig {
    pub const DEFAULT_GAS_LIMIT: u64 = 1_000;
    pub const DEFAULT_MAX_ACTIONS_PER_BLOCK: usize = 256;

    pub fn with_game_config(mut self, game_config: GameConfig) -> Self {
        self.game_config = game_config;
        self
    }

    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    pub fn with_max_actions_per_block(mut self, max: usize) -> Self {
        self.max_actions_per_block = max;
        self
    }

    pub fn with_genesis_seed(mut self, seed: u64) -> Self {
        self.genesis_seed = seed;
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            gas_limit: Self::DEFAULT_GAS_LIMIT,
            max_actions_per_block: Self::DEFAULT_MAX_ACTIONS_PER_BLOCK,
            genesis_seed: 0,
        }
    }
}
