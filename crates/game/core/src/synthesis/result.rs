use serde::{Deserialize, Serialize};

use crate::state::{Grade, Item};

/// Outcome of one synthesis unit. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisResult {
    item: Item,
    success: bool,
    source_grade: Grade,
    recipe_id: Option<u32>,
    sub_recipe_id: Option<u32>,
}

impl SynthesisResult {
    pub(crate) fn new(
        item: Item,
        success: bool,
        source_grade: Grade,
        recipe_id: Option<u32>,
        sub_recipe_id: Option<u32>,
    ) -> Self {
        Self {
            item,
            success,
            source_grade,
            recipe_id,
            sub_recipe_id,
        }
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn into_item(self) -> Item {
        self.item
    }

    /// True only when the produced item is strictly above the source grade.
    pub fn success(&self) -> bool {
        self.success
    }

    pub fn source_grade(&self) -> Grade {
        self.source_grade
    }

    pub fn recipe_id(&self) -> Option<u32> {
        self.recipe_id
    }

    pub fn sub_recipe_id(&self) -> Option<u32> {
        self.sub_recipe_id
    }
}
