use serde::{Deserialize, Serialize};

use crate::state::{Grade, ItemBase, ItemSubType, StatType};

/// Item table row: a candidate outcome for synthesis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRow {
    pub id: u32,
    pub grade: Grade,
    pub item_sub_type: ItemSubType,
}

impl ItemRow {
    pub const fn new(id: u32, grade: Grade, item_sub_type: ItemSubType) -> Self {
        Self {
            id,
            grade,
            item_sub_type,
        }
    }

    pub const fn base(&self) -> ItemBase {
        ItemBase::new(self.id, self.grade, self.item_sub_type)
    }
}

/// Equipment recipe. `sub_recipe_ids` keep declared order; the first one is
/// the sub-recipe synthesis resolves to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRow {
    pub id: u32,
    pub result_equipment_id: u32,
    #[serde(default)]
    pub sub_recipe_ids: Vec<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubRecipeOption {
    pub option_id: u32,
    /// Unlock probability out of `GameConfig::SUCCESS_RATE_SCALE`.
    pub ratio: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubRecipeRow {
    pub id: u32,
    #[serde(default)]
    pub options: Vec<SubRecipeOption>,
}

/// Option definition with inclusive value ranges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionRow {
    Stat {
        id: u32,
        stat: StatType,
        min: u32,
        max: u32,
    },
    Skill {
        id: u32,
        skill_id: u32,
        power_min: u32,
        power_max: u32,
        chance_min: u32,
        chance_max: u32,
    },
}

impl OptionRow {
    pub const fn id(&self) -> u32 {
        match self {
            OptionRow::Stat { id, .. } | OptionRow::Skill { id, .. } => *id,
        }
    }
}
