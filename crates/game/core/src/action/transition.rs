use crate::address::Address;
use crate::config::GameConfig;
use crate::env::{GameEnv, RandomSource};
use crate::state::WorldState;

/// Per-invocation facts supplied by the host.
pub struct ActionContext<'a> {
    /// Already-verified signer of the action.
    pub signer: Address,
    pub block_index: u64,
    pub env: GameEnv<'a>,
    /// Seeded stream for this action only.
    pub rng: &'a mut dyn RandomSource,
}

/// Defines how a concrete action validates and mutates the world state.
///
/// The engine hands `apply` a private copy of the snapshot. Returning an error
/// from any phase discards that copy, so implementations may write eagerly.
/// Validation hooks must stay side-effect free and must not draw from the RNG.
pub trait ActionTransition {
    type Error;
    type Result;

    /// Gas charged before any state is loaded.
    fn cost(&self, config: &GameConfig) -> u64 {
        config.base_action_cost
    }

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &WorldState, _ctx: &ActionContext<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action. Implementations may assume `pre_validate` succeeded.
    fn apply(
        &self,
        state: &mut WorldState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions by comparing the states around the mutation.
    fn post_validate(
        &self,
        _before: &WorldState,
        _after: &WorldState,
        _ctx: &ActionContext<'_>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }
}
