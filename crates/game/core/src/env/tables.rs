use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::items::{ItemRow, OptionRow, RecipeRow, SubRecipeRow};
use crate::config::GameConfig;
use crate::state::{Currency, Grade, ItemSubType};

/// Read-only access to the pre-parsed static tables.
///
/// Lookups return `None` for absent rows; callers decide which error kind an
/// absence maps to. Every method that can match several rows answers in
/// declared table order, which is part of the replay contract.
pub trait SheetOracle: Send + Sync {
    fn currency(&self, ticker: &str) -> Option<&Currency>;

    fn synthesize_row(&self, grade: Grade) -> Option<&SynthesizeRow>;
    fn synthesize_weight_row(&self, grade: Grade) -> Option<&SynthesizeWeightRow>;

    fn item_row(&self, id: u32) -> Option<&ItemRow>;
    /// Every item of `(grade, sub_type)`, in table order.
    fn items_of(&self, grade: Grade, sub_type: ItemSubType) -> Vec<ItemRow>;

    /// First recipe (table order) producing `equipment_id`.
    fn first_recipe_for(&self, equipment_id: u32) -> Option<&RecipeRow>;
    fn sub_recipe(&self, id: u32) -> Option<&SubRecipeRow>;
    fn option_row(&self, id: u32) -> Option<&OptionRow>;

    fn arena_round(&self, championship_id: u32, round: u32) -> Option<&ArenaRow>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesizeEntry {
    pub required_count: u32,
    /// Out of `GameConfig::SUCCESS_RATE_SCALE`.
    pub succeed_rate: u32,
}

impl SynthesizeEntry {
    pub const fn new(required_count: u32, succeed_rate: u32) -> Self {
        Self {
            required_count,
            succeed_rate,
        }
    }
}

/// Conversion ratios for one source grade.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesizeRow {
    pub grade: Grade,
    pub entries: BTreeMap<ItemSubType, SynthesizeEntry>,
}

impl SynthesizeRow {
    pub fn new(grade: Grade) -> Self {
        Self {
            grade,
            entries: BTreeMap::new(),
        }
    }

    pub fn with_entry(mut self, sub_type: ItemSubType, entry: SynthesizeEntry) -> Self {
        self.entries.insert(sub_type, entry);
        self
    }

    pub fn entry(&self, sub_type: ItemSubType) -> Option<&SynthesizeEntry> {
        self.entries.get(&sub_type)
    }
}

/// Per-item selection weights for one grade.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesizeWeightRow {
    pub grade: Grade,
    pub weights: BTreeMap<u32, u32>,
}

impl SynthesizeWeightRow {
    pub fn new(grade: Grade) -> Self {
        Self {
            grade,
            weights: BTreeMap::new(),
        }
    }

    pub fn with_weight(mut self, item_id: u32, weight: u32) -> Self {
        self.weights.insert(item_id, weight);
        self
    }

    /// Listed weight, or [`GameConfig::DEFAULT_SYNTHESIS_WEIGHT`].
    pub fn weight_of(&self, item_id: u32) -> u32 {
        self.weights
            .get(&item_id)
            .copied()
            .unwrap_or(GameConfig::DEFAULT_SYNTHESIS_WEIGHT)
    }
}

/// One arena round. Joining is open for `start_block..=end_block`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaRow {
    pub championship_id: u32,
    pub round: u32,
    pub start_block: u64,
    pub end_block: u64,
    pub entrance_fee: u128,
    pub ticker: String,
}

impl ArenaRow {
    pub fn is_open_at(&self, block_index: u64) -> bool {
        (self.start_block..=self.end_block).contains(&block_index)
    }
}
