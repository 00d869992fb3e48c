use crate::error::{ErrorKind, GameError};
use crate::state::{Grade, ItemSubType};

/// Errors that abort a whole synthesis batch.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SynthesisError {
    #[error("no synthesize row for grade {grade}")]
    MissingSynthesizeRow { grade: Grade },

    #[error("synthesize row for {grade} has no entry for {sub_type}")]
    MissingSynthesizeEntry { grade: Grade, sub_type: ItemSubType },

    #[error("synthesize entry for {grade} {sub_type} requires zero materials")]
    ZeroRequiredCount { grade: Grade, sub_type: ItemSubType },

    #[error("{sub_type} cannot be synthesized")]
    UnsupportedSubType { sub_type: ItemSubType },

    #[error("{count} {grade} {sub_type} is not a positive multiple of {required}")]
    InsufficientMaterial {
        grade: Grade,
        sub_type: ItemSubType,
        count: u32,
        required: u32,
    },

    #[error("no {sub_type} candidates for grade {grade}")]
    NoCandidates { grade: Grade, sub_type: ItemSubType },

    #[error("recipe {recipe_id} declares no sub-recipe")]
    EmptyRecipe { recipe_id: u32 },

    #[error("sub-recipe {sub_recipe_id} is not in the table")]
    MissingSubRecipe { sub_recipe_id: u32 },

    #[error("option {option_id} is not in the table")]
    MissingOption { option_id: u32 },

    #[error("total weight of {grade} {sub_type} candidates overflows")]
    WeightOverflow { grade: Grade, sub_type: ItemSubType },

    #[error("weighted walk exhausted: draw {draw} over total {total}")]
    WeightWalkExhausted { draw: u64, total: u64 },
}

impl GameError for SynthesisError {
    fn kind(&self) -> ErrorKind {
        use SynthesisError::*;
        match self {
            MissingSynthesizeRow { .. }
            | MissingSynthesizeEntry { .. }
            | ZeroRequiredCount { .. }
            | NoCandidates { .. }
            | EmptyRecipe { .. }
            | MissingSubRecipe { .. }
            | MissingOption { .. } => ErrorKind::ConfigurationMissing,
            UnsupportedSubType { .. } => ErrorKind::InvalidMaterial,
            InsufficientMaterial { .. } => ErrorKind::InsufficientMaterial,
            WeightOverflow { .. } | WeightWalkExhausted { .. } => ErrorKind::InternalInconsistency,
        }
    }

    fn error_code(&self) -> &'static str {
        use SynthesisError::*;
        match self {
            MissingSynthesizeRow { .. } => "SYNTHESIS_MISSING_ROW",
            MissingSynthesizeEntry { .. } => "SYNTHESIS_MISSING_ENTRY",
            ZeroRequiredCount { .. } => "SYNTHESIS_ZERO_REQUIRED_COUNT",
            UnsupportedSubType { .. } => "SYNTHESIS_UNSUPPORTED_SUBTYPE",
            InsufficientMaterial { .. } => "SYNTHESIS_INSUFFICIENT_MATERIAL",
            NoCandidates { .. } => "SYNTHESIS_NO_CANDIDATES",
            EmptyRecipe { .. } => "SYNTHESIS_EMPTY_RECIPE",
            MissingSubRecipe { .. } => "SYNTHESIS_MISSING_SUB_RECIPE",
            MissingOption { .. } => "SYNTHESIS_MISSING_OPTION",
            WeightOverflow { .. } => "SYNTHESIS_WEIGHT_OVERFLOW",
            WeightWalkExhausted { .. } => "SYNTHESIS_WEIGHT_WALK_EXHAUSTED",
        }
    }
}
