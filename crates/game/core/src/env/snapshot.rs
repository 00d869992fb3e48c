//! In-memory table snapshot.
//!
//! [`TablesSnapshot`] stores every table as a `Vec` in declared order and
//! answers [`SheetOracle`] lookups by linear scan. Scans keep the "first match
//! wins" rule explicit: reordering rows changes outcomes.

use serde::{Deserialize, Serialize};

use super::items::{ItemRow, OptionRow, RecipeRow, SubRecipeRow};
use super::tables::{ArenaRow, SheetOracle, SynthesizeRow, SynthesizeWeightRow};
use crate::state::{Currency, Grade, ItemSubType};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablesSnapshot {
    #[serde(default)]
    pub currencies: Vec<Currency>,
    #[serde(default)]
    pub synthesize: Vec<SynthesizeRow>,
    #[serde(default)]
    pub synthesize_weights: Vec<SynthesizeWeightRow>,
    #[serde(default)]
    pub items: Vec<ItemRow>,
    #[serde(default)]
    pub recipes: Vec<RecipeRow>,
    #[serde(default)]
    pub sub_recipes: Vec<SubRecipeRow>,
    #[serde(default)]
    pub options: Vec<OptionRow>,
    #[serde(default)]
    pub arena: Vec<ArenaRow>,
}

impl TablesSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currencies.push(currency);
        self
    }

    pub fn with_synthesize_row(mut self, row: SynthesizeRow) -> Self {
        self.synthesize.push(row);
        self
    }

    pub fn with_weight_row(mut self, row: SynthesizeWeightRow) -> Self {
        self.synthesize_weights.push(row);
        self
    }

    pub fn with_item(mut self, row: ItemRow) -> Self {
        self.items.push(row);
        self
    }

    pub fn with_items(mut self, rows: impl IntoIterator<Item = ItemRow>) -> Self {
        self.items.extend(rows);
        self
    }

    pub fn with_recipe(mut self, row: RecipeRow) -> Self {
        self.recipes.push(row);
        self
    }

    pub fn with_sub_recipe(mut self, row: SubRecipeRow) -> Self {
        self.sub_recipes.push(row);
        self
    }

    pub fn with_option(mut self, row: OptionRow) -> Self {
        self.options.push(row);
        self
    }

    pub fn with_arena_round(mut self, row: ArenaRow) -> Self {
        self.arena.push(row);
        self
    }
}

impl SheetOracle for TablesSnapshot {
    fn currency(&self, ticker: &str) -> Option<&Currency> {
        self.currencies
            .iter()
            .find(|currency| currency.ticker() == ticker)
    }

    fn synthesize_row(&self, grade: Grade) -> Option<&SynthesizeRow> {
        self.synthesize.iter().find(|row| row.grade == grade)
    }

    fn synthesize_weight_row(&self, grade: Grade) -> Option<&SynthesizeWeightRow> {
        self.synthesize_weights.iter().find(|row| row.grade == grade)
    }

    fn item_row(&self, id: u32) -> Option<&ItemRow> {
        self.items.iter().find(|row| row.id == id)
    }

    fn items_of(&self, grade: Grade, sub_type: ItemSubType) -> Vec<ItemRow> {
        self.items
            .iter()
            .filter(|row| row.grade == grade && row.item_sub_type == sub_type)
            .copied()
            .collect()
    }

    fn first_recipe_for(&self, equipment_id: u32) -> Option<&RecipeRow> {
        self.recipes
            .iter()
            .find(|row| row.result_equipment_id == equipment_id)
    }

    fn sub_recipe(&self, id: u32) -> Option<&SubRecipeRow> {
        self.sub_recipes.iter().find(|row| row.id == id)
    }

    fn option_row(&self, id: u32) -> Option<&OptionRow> {
        self.options.iter().find(|row| row.id() == id)
    }

    fn arena_round(&self, championship_id: u32, round: u32) -> Option<&ArenaRow> {
        self.arena
            .iter()
            .find(|row| row.championship_id == championship_id && row.round == round)
    }
}
