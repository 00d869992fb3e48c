//! Error types for action execution pipeline.

use serde::{Deserialize, Serialize};

use crate::action::{
    ActionError, ActionTransition, CreateAvatarAction, GasError, JoinArenaAction,
    JoinGuildAction, MakeGuildAction, MintAssetsAction, PayloadError, SynthesizeAction,
    TransferAssetAction, UpdateValidatorsAction,
};
use crate::error::{ErrorKind, GameError};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while executing an action through the game engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExecuteError {
    #[error("malformed payload: {0}")]
    Payload(PayloadError),

    #[error("{0}")]
    Gas(GasError),

    #[error("create avatar action failed: {0}")]
    CreateAvatar(TransitionPhaseError<<CreateAvatarAction as ActionTransition>::Error>),

    #[error("synthesize action failed: {0}")]
    Synthesize(TransitionPhaseError<<SynthesizeAction as ActionTransition>::Error>),

    #[error("transfer asset action failed: {0}")]
    TransferAsset(TransitionPhaseError<<TransferAssetAction as ActionTransition>::Error>),

    #[error("mint assets action failed: {0}")]
    MintAssets(TransitionPhaseError<<MintAssetsAction as ActionTransition>::Error>),

    #[error("join arena action failed: {0}")]
    JoinArena(TransitionPhaseError<<JoinArenaAction as ActionTransition>::Error>),

    #[error("update validators action failed: {0}")]
    UpdateValidators(TransitionPhaseError<<UpdateValidatorsAction as ActionTransition>::Error>),

    #[error("make guild action failed: {0}")]
    MakeGuild(TransitionPhaseError<<MakeGuildAction as ActionTransition>::Error>),

    #[error("join guild action failed: {0}")]
    JoinGuild(TransitionPhaseError<<JoinGuildAction as ActionTransition>::Error>),
}

impl ExecuteError {
    fn transition(&self) -> Option<&TransitionPhaseError<ActionError>> {
        use ExecuteError::*;
        match self {
            Payload(_) | Gas(_) => None,
            CreateAvatar(error) | Synthesize(error) | TransferAsset(error) | MintAssets(error)
            | JoinArena(error) | UpdateValidators(error) | MakeGuild(error)
            | JoinGuild(error) => Some(error),
        }
    }

    /// Pipeline phase that failed; `None` when the action never reached it.
    pub fn phase(&self) -> Option<TransitionPhase> {
        self.transition().map(|error| error.phase)
    }

    /// Underlying action error, if the failure came from a transition.
    pub fn action_error(&self) -> Option<&ActionError> {
        self.transition().map(|error| &error.error)
    }
}

impl GameError for ExecuteError {
    fn kind(&self) -> ErrorKind {
        match self {
            ExecuteError::Payload(error) => error.kind(),
            ExecuteError::Gas(error) => error.kind(),
            other => other
                .action_error()
                .map_or(ErrorKind::InternalInconsistency, GameError::kind),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ExecuteError::Payload(error) => error.error_code(),
            ExecuteError::Gas(error) => error.error_code(),
            other => other
                .action_error()
                .map_or("EXECUTE_UNKNOWN", GameError::error_code),
        }
    }
}
