use super::SynthesisError;
use super::pool::CandidatePool;
use crate::config::GameConfig;
use crate::env::{ItemRow, RandomSource, SheetOracle};

/// Picks one candidate from `pool` by weight.
///
/// Draws `w` from `[0, total]` (inclusive of `total`) and returns the first
/// candidate whose running weight sum exceeds `w`. A zero-weight candidate can
/// never be picked, and a draw equal to `total` exhausts the walk. Unlisted
/// items, and every item of a grade with no weight row, weigh
/// [`GameConfig::DEFAULT_SYNTHESIS_WEIGHT`].
pub(crate) fn pick<'p, R: RandomSource + ?Sized>(
    sheets: &dyn SheetOracle,
    pool: &'p CandidatePool,
    rng: &mut R,
) -> Result<&'p ItemRow, SynthesisError> {
    let weight_row = sheets.synthesize_weight_row(pool.grade());
    let weights: Vec<u64> = pool
        .candidates()
        .iter()
        .map(|candidate| {
            let weight = weight_row.map_or(GameConfig::DEFAULT_SYNTHESIS_WEIGHT, |row| {
                row.weight_of(candidate.id)
            });
            u64::from(weight)
        })
        .collect();

    let total: u64 = weights.iter().sum();
    let bound = u32::try_from(total + 1).map_err(|_| SynthesisError::WeightOverflow {
        grade: pool.grade(),
        sub_type: pool.sub_type(),
    })?;
    let draw = u64::from(rng.next(bound));

    let mut running = 0u64;
    for (candidate, weight) in pool.candidates().iter().zip(weights) {
        running += weight;
        if running > draw {
            return Ok(candidate);
        }
    }

    Err(SynthesisError::WeightWalkExhausted { draw, total })
}
