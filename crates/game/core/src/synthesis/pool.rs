use super::SynthesisError;
use crate::env::{ItemRow, SheetOracle};
use crate::state::{Grade, ItemSubType};

/// Candidates one unit draws its outcome from, all of one grade.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct CandidatePool {
    grade: Grade,
    sub_type: ItemSubType,
    candidates: Vec<ItemRow>,
}

impl CandidatePool {
    /// A successful roll prefers the next grade up and falls back to the
    /// source grade when that pool is empty; a failed roll uses the source
    /// grade directly.
    pub(crate) fn select(
        sheets: &dyn SheetOracle,
        source: Grade,
        sub_type: ItemSubType,
        success: bool,
    ) -> Result<Self, SynthesisError> {
        if success {
            let target = source.next();
            let promoted = sheets.items_of(target, sub_type);
            if !promoted.is_empty() {
                return Ok(Self {
                    grade: target,
                    sub_type,
                    candidates: promoted,
                });
            }
        }

        let candidates = sheets.items_of(source, sub_type);
        if candidates.is_empty() {
            return Err(SynthesisError::NoCandidates {
                grade: source,
                sub_type,
            });
        }
        Ok(Self {
            grade: source,
            sub_type,
            candidates,
        })
    }

    pub(crate) fn grade(&self) -> Grade {
        self.grade
    }

    pub(crate) fn sub_type(&self) -> ItemSubType {
        self.sub_type
    }

    pub(crate) fn candidates(&self) -> &[ItemRow] {
        &self.candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::TablesSnapshot;

    fn tables() -> TablesSnapshot {
        TablesSnapshot::new().with_items([
            ItemRow::new(1, Grade::Rare, ItemSubType::Aura),
            ItemRow::new(2, Grade::Epic, ItemSubType::Aura),
            ItemRow::new(3, Grade::Divinity, ItemSubType::Ring),
        ])
    }

    #[test]
    fn success_prefers_next_grade() {
        let pool = CandidatePool::select(&tables(), Grade::Rare, ItemSubType::Aura, true).unwrap();
        assert_eq!(pool.grade(), Grade::Epic);
        assert_eq!(pool.candidates()[0].id, 2);
    }

    #[test]
    fn failure_stays_on_source_grade() {
        let pool = CandidatePool::select(&tables(), Grade::Rare, ItemSubType::Aura, false).unwrap();
        assert_eq!(pool.grade(), Grade::Rare);
    }

    #[test]
    fn divinity_saturates_onto_itself() {
        let pool =
            CandidatePool::select(&tables(), Grade::Divinity, ItemSubType::Ring, true).unwrap();
        assert_eq!(pool.grade(), Grade::Divinity);
    }

    #[test]
    fn empty_pools_are_reported() {
        let error =
            CandidatePool::select(&tables(), Grade::Epic, ItemSubType::Ring, true).unwrap_err();
        assert_eq!(
            error,
            SynthesisError::NoCandidates {
                grade: Grade::Epic,
                sub_type: ItemSubType::Ring
            }
        );
    }
}
