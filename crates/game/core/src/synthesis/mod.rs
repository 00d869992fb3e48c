//! Grade-partitioned weighted synthesis.
//!
//! Materials are grouped by `(grade, subtype)`. Every group converts into
//! `count / required_count` units, and each unit independently rolls for
//! promotion, picks an outcome pool, draws an item by weight and, for
//! equipment, unlocks options. All randomness comes from one stream, consumed
//! in this order per unit:
//!
//! 1. success roll: `next(SUCCESS_RATE_SCALE)`
//! 2. weighted pick: `next(total_weight + 1)`
//! 3. non-fungible id: four `next_u32` words
//! 4. equipment options: one roll per declared option, plus value draws on hits
//!
//! Groups run in ascending grade then subtype order, units in index order.
//! Results come back in that same order, which is the RNG consumption order;
//! a client simulation and the authoritative execution therefore agree as long
//! as they see the same tables, materials and seed.
mod error;
mod options;
mod pool;
mod result;
mod weight;

use std::collections::BTreeMap;

pub use error::SynthesisError;
pub use result::SynthesisResult;

use crate::config::GameConfig;
use crate::env::{ItemRow, RandomSource, SheetOracle};
use crate::state::{Costume, Equipment, Grade, Item, ItemSubType, ItemType, NonFungibleId, RecipeRef};
use pool::CandidatePool;

/// `grade -> (subtype -> count)`.
pub type GradeMaterialCount = BTreeMap<Grade, BTreeMap<ItemSubType, u32>>;

/// Groups items by `(grade, subtype)`.
pub fn tally<'a>(items: impl IntoIterator<Item = &'a Item>) -> GradeMaterialCount {
    let mut counts = GradeMaterialCount::new();
    for item in items {
        *counts
            .entry(item.grade())
            .or_default()
            .entry(item.item_sub_type())
            .or_default() += 1;
    }
    counts
}

/// Runs every unit of every group. Any failure aborts the whole batch.
pub fn synthesize<R: RandomSource + ?Sized>(
    sheets: &dyn SheetOracle,
    materials: &GradeMaterialCount,
    block_index: u64,
    rng: &mut R,
) -> Result<Vec<SynthesisResult>, SynthesisError> {
    let mut results = Vec::new();

    for (&grade, by_sub_type) in materials {
        let row = sheets
            .synthesize_row(grade)
            .ok_or(SynthesisError::MissingSynthesizeRow { grade })?;

        for (&sub_type, &count) in by_sub_type {
            if sub_type.item_type() == ItemType::Material {
                return Err(SynthesisError::UnsupportedSubType { sub_type });
            }
            let entry = row
                .entry(sub_type)
                .ok_or(SynthesisError::MissingSynthesizeEntry { grade, sub_type })?;
            let unit_count = unit_count(grade, sub_type, count, entry.required_count)?;

            for _ in 0..unit_count {
                let roll = rng.next(GameConfig::SUCCESS_RATE_SCALE);
                let promoted = roll < entry.succeed_rate;

                let pool = CandidatePool::select(sheets, grade, sub_type, promoted)?;
                // a promotion only counts if the outcome is strictly higher grade
                let success = promoted && pool.grade() > grade;

                let picked = *weight::pick(sheets, &pool, rng)?;
                results.push(forge(sheets, picked, grade, success, block_index, rng)?);
            }
        }
    }

    Ok(results)
}

fn unit_count(
    grade: Grade,
    sub_type: ItemSubType,
    count: u32,
    required: u32,
) -> Result<u32, SynthesisError> {
    if required == 0 {
        return Err(SynthesisError::ZeroRequiredCount { grade, sub_type });
    }
    let units = count / required;
    if units == 0 || count % required != 0 {
        return Err(SynthesisError::InsufficientMaterial {
            grade,
            sub_type,
            count,
            required,
        });
    }
    Ok(units)
}

/// Builds the produced item. Produced items unlock at the block they were made in.
fn forge<R: RandomSource + ?Sized>(
    sheets: &dyn SheetOracle,
    picked: ItemRow,
    source_grade: Grade,
    success: bool,
    block_index: u64,
    rng: &mut R,
) -> Result<SynthesisResult, SynthesisError> {
    let non_fungible_id = NonFungibleId::generate(rng);

    match picked.item_sub_type.item_type() {
        ItemType::Costume => {
            let item = Item::Costume(Costume {
                base: picked.base(),
                non_fungible_id,
                required_block_index: block_index,
            });
            Ok(SynthesisResult::new(item, success, source_grade, None, None))
        }
        ItemType::Equipment => {
            let recipe = match sheets.first_recipe_for(picked.id) {
                Some(recipe) => {
                    let sub_recipe_id = recipe
                        .sub_recipe_ids
                        .first()
                        .copied()
                        .ok_or(SynthesisError::EmptyRecipe {
                            recipe_id: recipe.id,
                        })?;
                    let sub_recipe = sheets
                        .sub_recipe(sub_recipe_id)
                        .ok_or(SynthesisError::MissingSubRecipe { sub_recipe_id })?;
                    Some((
                        RecipeRef {
                            recipe_id: recipe.id,
                            sub_recipe_id,
                        },
                        sub_recipe,
                    ))
                }
                None => None,
            };

            let options = match recipe {
                Some((_, sub_recipe)) => options::unlock_options(sheets, sub_recipe, rng)?,
                None => Vec::new(),
            };
            let recipe = recipe.map(|(reference, _)| reference);

            let item = Item::Equipment(Equipment {
                base: picked.base(),
                non_fungible_id,
                required_block_index: block_index,
                options,
                recipe,
            });
            Ok(SynthesisResult::new(
                item,
                success,
                source_grade,
                recipe.map(|reference| reference.recipe_id),
                recipe.map(|reference| reference.sub_recipe_id),
            ))
        }
        ItemType::Material => Err(SynthesisError::UnsupportedSubType {
            sub_type: picked.item_sub_type,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRandom, RecipeRow, SynthesizeEntry, SynthesizeRow, TablesSnapshot};
    use crate::error::{ErrorKind, GameError};

    /// Always draws zero.
    struct Zeros;

    impl RandomSource for Zeros {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next(&mut self, _bound: u32) -> u32 {
            0
        }
    }

    fn tables(rate: u32) -> TablesSnapshot {
        TablesSnapshot::new()
            .with_synthesize_row(
                SynthesizeRow::new(Grade::Rare)
                    .with_entry(ItemSubType::FullCostume, SynthesizeEntry::new(3, rate)),
            )
            .with_items([
                ItemRow::new(40_100_001, Grade::Rare, ItemSubType::FullCostume),
                ItemRow::new(40_100_002, Grade::Epic, ItemSubType::FullCostume),
            ])
    }

    fn costumes(count: u32) -> GradeMaterialCount {
        GradeMaterialCount::from([(
            Grade::Rare,
            BTreeMap::from([(ItemSubType::FullCostume, count)]),
        )])
    }

    #[test]
    fn tally_groups_by_grade_and_subtype() {
        let item = |grade| {
            Item::Costume(Costume {
                base: crate::state::ItemBase::new(1, grade, ItemSubType::Title),
                non_fungible_id: NonFungibleId([0; 16]),
                required_block_index: 0,
            })
        };
        let items = [item(Grade::Rare), item(Grade::Normal), item(Grade::Rare)];
        let counts = tally(&items);
        assert_eq!(counts[&Grade::Rare][&ItemSubType::Title], 2);
        assert_eq!(counts[&Grade::Normal][&ItemSubType::Title], 1);
    }

    #[test]
    fn costume_units_consume_fixed_draws() {
        let mut rng = PcgRandom::new(11);
        let results = synthesize(&tables(10_000), &costumes(6), 42, &mut rng).unwrap();

        assert_eq!(results.len(), 2);
        for result in &results {
            assert!(result.success());
            assert_eq!(result.item().grade(), Grade::Epic);
            assert_eq!(result.item().required_block_index(), Some(42));
            assert_eq!(result.recipe_id(), None);
        }
        // per unit: success roll, weighted pick, four id words
        assert_eq!(rng.draws(), 12);
    }

    #[test]
    fn remainder_rejects_whole_batch() {
        let error =
            synthesize(&tables(5_000), &costumes(4), 0, &mut PcgRandom::new(0)).unwrap_err();
        assert!(matches!(
            error,
            SynthesisError::InsufficientMaterial {
                count: 4,
                required: 3,
                ..
            }
        ));
    }

    #[test]
    fn recipe_without_sub_recipes_is_configuration_missing() {
        let tables = TablesSnapshot::new()
            .with_synthesize_row(
                SynthesizeRow::new(Grade::Rare)
                    .with_entry(ItemSubType::Weapon, SynthesizeEntry::new(2, 10_000)),
            )
            .with_items([
                ItemRow::new(10_100_001, Grade::Rare, ItemSubType::Weapon),
                ItemRow::new(10_200_001, Grade::Epic, ItemSubType::Weapon),
            ])
            .with_recipe(RecipeRow {
                id: 3,
                result_equipment_id: 10_200_001,
                sub_recipe_ids: Vec::new(),
            });
        let materials = GradeMaterialCount::from([(
            Grade::Rare,
            BTreeMap::from([(ItemSubType::Weapon, 2)]),
        )]);

        let error = synthesize(&tables, &materials, 0, &mut Zeros).unwrap_err();
        assert_eq!(error, SynthesisError::EmptyRecipe { recipe_id: 3 });
        assert_eq!(error.kind(), ErrorKind::ConfigurationMissing);
    }

    #[test]
    fn missing_grade_row_is_configuration_missing() {
        let materials = GradeMaterialCount::from([(
            Grade::Epic,
            BTreeMap::from([(ItemSubType::FullCostume, 3)]),
        )]);
        let error = synthesize(&tables(0), &materials, 0, &mut PcgRandom::new(0)).unwrap_err();
        assert_eq!(error, SynthesisError::MissingSynthesizeRow { grade: Grade::Epic });
    }
}
