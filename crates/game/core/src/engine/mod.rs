//! Action execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`WorldState`]. Each call
//! is a pure function of `(snapshot, plain action, input)`:
//!
//! 1. decode the payload into an [`ActionKind`]
//! 2. charge the action's gas cost
//! 3. clone the snapshot and drive `pre_validate -> apply -> post_validate`
//! 4. diff the result against the input
//!
//! Any failure discards the clone, so the caller's snapshot is never touched.

mod errors;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

use crate::action::{ActionContext, ActionKind, ActionResult, GasMeter, PlainAction};
use crate::address::Address;
use crate::env::{GameEnv, PcgRandom, RandomSource};
use crate::error::{ErrorKind, ErrorSeverity, GameError};
use crate::state::{StateDelta, WorldState};

/// Host-supplied facts for a single action invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionInput {
    pub signer: Address,
    pub block_index: u64,
    pub random_seed: u64,
    pub gas_limit: u64,
}

/// Complete outcome of an applied action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionOutput {
    /// Snapshot after the action.
    pub state: WorldState,
    pub result: ActionResult,
    pub gas_used: u64,
    /// Everything the action wrote.
    pub delta: StateDelta,
}

/// Structured description of a rejected action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionFailure {
    pub kind: ErrorKind,
    pub severity: ErrorSeverity,
    pub code: &'static str,
    pub phase: Option<TransitionPhase>,
    pub message: String,
}

impl From<&ExecuteError> for ActionFailure {
    fn from(error: &ExecuteError) -> Self {
        Self {
            kind: error.kind(),
            severity: error.severity(),
            code: error.error_code(),
            phase: error.phase(),
            message: error.to_string(),
        }
    }
}

/// Either the applied output or the untouched input with its failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionEvaluation {
    Applied(ActionOutput),
    Rejected {
        state: WorldState,
        failure: ActionFailure,
    },
}

impl ActionEvaluation {
    /// Snapshot to continue from: the new one if applied, the input otherwise.
    pub fn state(&self) -> &WorldState {
        match self {
            ActionEvaluation::Applied(output) => &output.state,
            ActionEvaluation::Rejected { state, .. } => state,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, ActionEvaluation::Applied(_))
    }
}

/// Stateless executor bound to one set of tables and config.
#[derive(Clone, Copy, Debug)]
pub struct GameEngine<'a> {
    env: GameEnv<'a>,
}

impl<'a> GameEngine<'a> {
    pub fn new(env: GameEnv<'a>) -> Self {
        Self { env }
    }

    pub fn env(&self) -> GameEnv<'a> {
        self.env
    }

    /// Executes `action` with an RNG seeded from `input.random_seed`.
    pub fn execute(
        &self,
        state: &WorldState,
        action: &PlainAction,
        input: &ActionInput,
    ) -> Result<ActionOutput, ExecuteError> {
        let mut rng = PcgRandom::new(input.random_seed);
        self.execute_with_rng(state, action, input, &mut rng)
    }

    /// Executes `action` drawing from a caller-provided stream.
    ///
    /// `input.random_seed` is ignored.
    pub fn execute_with_rng(
        &self,
        state: &WorldState,
        action: &PlainAction,
        input: &ActionInput,
        rng: &mut dyn RandomSource,
    ) -> Result<ActionOutput, ExecuteError> {
        let kind = ActionKind::decode(action).map_err(ExecuteError::Payload)?;
        self.execute_kind(state, &kind, input, rng)
    }

    /// Executes an already decoded action.
    pub fn execute_kind(
        &self,
        state: &WorldState,
        kind: &ActionKind,
        input: &ActionInput,
        rng: &mut dyn RandomSource,
    ) -> Result<ActionOutput, ExecuteError> {
        let mut meter = GasMeter::new(input.gas_limit);
        meter
            .charge(kind.cost(self.env.config()))
            .map_err(ExecuteError::Gas)?;

        let mut next = state.clone();
        let mut ctx = ActionContext {
            signer: input.signer,
            block_index: input.block_index,
            env: self.env,
            rng,
        };
        let result = transition::execute_transition(kind, state, &mut next, &mut ctx)?;

        let delta = next.diff(state);
        Ok(ActionOutput {
            state: next,
            result,
            gas_used: meter.used(),
            delta,
        })
    }

    /// Like [`GameEngine::execute`], but folds failures into a rejection that
    /// carries the input snapshot.
    pub fn evaluate(
        &self,
        state: &WorldState,
        action: &PlainAction,
        input: &ActionInput,
    ) -> ActionEvaluation {
        match self.execute(state, action, input) {
            Ok(output) => ActionEvaluation::Applied(output),
            Err(error) => ActionEvaluation::Rejected {
                state: state.clone(),
                failure: ActionFailure::from(&error),
            },
        }
    }
}
