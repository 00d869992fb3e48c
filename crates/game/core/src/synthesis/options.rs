use super::SynthesisError;
use crate::config::GameConfig;
use crate::env::{OptionRow, RandomSource, SheetOracle, SubRecipeRow};
use crate::state::ItemOption;

/// Rolls every option a sub-recipe declares, in declared order.
///
/// Each declared option costs one `next(SUCCESS_RATE_SCALE)` draw; a hit then
/// draws the option's values. Missing option rows fail before their roll.
pub(crate) fn unlock_options<R: RandomSource + ?Sized>(
    sheets: &dyn SheetOracle,
    sub_recipe: &SubRecipeRow,
    rng: &mut R,
) -> Result<Vec<ItemOption>, SynthesisError> {
    let mut unlocked = Vec::new();

    for declared in &sub_recipe.options {
        let row = sheets
            .option_row(declared.option_id)
            .ok_or(SynthesisError::MissingOption {
                option_id: declared.option_id,
            })?;

        if rng.next(GameConfig::SUCCESS_RATE_SCALE) >= declared.ratio {
            continue;
        }

        let option = match *row {
            OptionRow::Stat { stat, min, max, .. } => ItemOption::Stat {
                stat,
                value: draw_inclusive(rng, min, max),
            },
            OptionRow::Skill {
                skill_id,
                power_min,
                power_max,
                chance_min,
                chance_max,
                ..
            } => {
                let power = draw_inclusive(rng, power_min, power_max);
                let chance = draw_inclusive(rng, chance_min, chance_max);
                ItemOption::Skill {
                    skill_id,
                    power,
                    chance,
                }
            }
        };
        unlocked.push(option);
    }

    Ok(unlocked)
}

/// Uniform draw from `[min, max]`; bounds given in either order.
fn draw_inclusive<R: RandomSource + ?Sized>(rng: &mut R, min: u32, max: u32) -> u32 {
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    match (high - low).checked_add(1) {
        Some(span) => low + rng.next(span),
        None => rng.next_u32(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRandom, SubRecipeOption, TablesSnapshot};
    use crate::state::StatType;

    fn tables() -> TablesSnapshot {
        TablesSnapshot::new()
            .with_option(OptionRow::Stat {
                id: 1,
                stat: StatType::Atk,
                min: 10,
                max: 20,
            })
            .with_option(OptionRow::Skill {
                id: 2,
                skill_id: 900,
                power_min: 5,
                power_max: 5,
                chance_min: 1,
                chance_max: 3,
            })
    }

    fn sub_recipe(ratio: u32) -> SubRecipeRow {
        SubRecipeRow {
            id: 1,
            options: vec![
                SubRecipeOption { option_id: 1, ratio },
                SubRecipeOption { option_id: 2, ratio },
            ],
        }
    }

    #[test]
    fn certain_options_always_unlock_within_range() {
        for seed in 0..50 {
            let options =
                unlock_options(&tables(), &sub_recipe(10_000), &mut PcgRandom::new(seed)).unwrap();
            assert_eq!(options.len(), 2);
            match options[0] {
                ItemOption::Stat { stat, value } => {
                    assert_eq!(stat, StatType::Atk);
                    assert!((10..=20).contains(&value));
                }
                ref other => panic!("expected stat option, got {other:?}"),
            }
            match options[1] {
                ItemOption::Skill { power, chance, .. } => {
                    assert_eq!(power, 5);
                    assert!((1..=3).contains(&chance));
                }
                ref other => panic!("expected skill option, got {other:?}"),
            }
        }
    }

    #[test]
    fn zero_ratio_rolls_but_never_unlocks() {
        let mut rng = PcgRandom::new(3);
        let options = unlock_options(&tables(), &sub_recipe(0), &mut rng).unwrap();
        assert!(options.is_empty());
        assert!(rng.draws() >= 2);
    }

    #[test]
    fn missing_option_row_fails() {
        let mut row = sub_recipe(10_000);
        row.options.push(SubRecipeOption {
            option_id: 77,
            ratio: 1,
        });
        let error = unlock_options(&tables(), &row, &mut PcgRandom::new(0)).unwrap_err();
        assert_eq!(error, SynthesisError::MissingOption { option_id: 77 });
    }
}
