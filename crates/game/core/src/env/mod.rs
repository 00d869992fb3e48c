//! Read-only inputs an action sees besides the world state.
//!
//! Static tables are reached through the [`SheetOracle`] trait so the engine is
//! not coupled to how tables are loaded. The [`GameEnv`] aggregate bundles the
//! oracle with the tunable [`GameConfig`].
mod items;
mod rng;
mod snapshot;
mod tables;

pub use items::{ItemRow, OptionRow, RecipeRow, SubRecipeOption, SubRecipeRow};
pub use rng::{PcgRandom, RandomSource, compute_seed};
pub use snapshot::TablesSnapshot;
pub use tables::{
    ArenaRow, SheetOracle, SynthesizeEntry, SynthesizeRow, SynthesizeWeightRow,
};

use crate::config::GameConfig;

/// Environment handed to every action.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    sheets: &'a dyn SheetOracle,
    config: &'a GameConfig,
}

impl<'a> GameEnv<'a> {
    pub fn new(sheets: &'a dyn SheetOracle, config: &'a GameConfig) -> Self {
        Self { sheets, config }
    }

    pub fn sheets(&self) -> &'a dyn SheetOracle {
        self.sheets
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }
}

impl core::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameEnv")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
