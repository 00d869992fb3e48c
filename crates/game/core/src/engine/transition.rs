//! Action transition dispatch and execution logic.

use crate::action::{ActionContext, ActionKind, ActionResult, ActionTransition};
use crate::state::WorldState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline and returns the result.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions against `before`
/// 2. `apply` - Mutate `state` (a private copy of `before`) and return result
/// 3. `post_validate` - Compare `before` with the mutated `state`
#[inline]
fn drive_transition<T>(
    transition: &T,
    before: &WorldState,
    state: &mut WorldState,
    ctx: &mut ActionContext<'_>,
) -> Result<T::Result, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(before, ctx)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(state, ctx)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(before, state, ctx)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

/// Routes each action kind to its transition and wraps the result in [`ActionResult`].
pub(super) fn execute_transition(
    action: &ActionKind,
    before: &WorldState,
    state: &mut WorldState,
    ctx: &mut ActionContext<'_>,
) -> Result<ActionResult, ExecuteError> {
    match action {
        ActionKind::CreateAvatar(transition) => {
            let avatar = drive_transition(transition, before, state, ctx)
                .map_err(ExecuteError::CreateAvatar)?;
            Ok(ActionResult::AvatarCreated { avatar })
        }
        ActionKind::Synthesize(transition) => {
            let results = drive_transition(transition, before, state, ctx)
                .map_err(ExecuteError::Synthesize)?;
            Ok(ActionResult::Synthesized(results))
        }
        ActionKind::TransferAsset(transition) => {
            drive_transition(transition, before, state, ctx).map_err(ExecuteError::TransferAsset)?;
            Ok(ActionResult::Transferred)
        }
        ActionKind::MintAssets(transition) => {
            let total = drive_transition(transition, before, state, ctx)
                .map_err(ExecuteError::MintAssets)?;
            Ok(ActionResult::Minted { total })
        }
        ActionKind::JoinArena(transition) => {
            drive_transition(transition, before, state, ctx).map_err(ExecuteError::JoinArena)?;
            Ok(ActionResult::ArenaJoined)
        }
        ActionKind::UpdateValidators(transition) => {
            let change = drive_transition(transition, before, state, ctx)
                .map_err(ExecuteError::UpdateValidators)?;
            Ok(ActionResult::ValidatorsUpdated(change))
        }
        ActionKind::MakeGuild(transition) => {
            let guild = drive_transition(transition, before, state, ctx)
                .map_err(ExecuteError::MakeGuild)?;
            Ok(ActionResult::GuildCreated { guild })
        }
        ActionKind::JoinGuild(transition) => {
            drive_transition(transition, before, state, ctx).map_err(ExecuteError::JoinGuild)?;
            Ok(ActionResult::GuildJoined {
                guild: transition.guild,
            })
        }
    }
}
