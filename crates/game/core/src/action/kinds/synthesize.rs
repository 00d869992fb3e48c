//! Synthesis action.
//!
//! Validation runs entirely before the first RNG draw: ownership, presence,
//! item kind, batch subtype and lock state are all checked on the snapshot
//! first. [`simulate_synthesis`] runs the same material collection and engine
//! call against a scratch copy, so a client that knows the seed sees exactly
//! what the authoritative execution will produce.

use crate::action::payload::{Payload, PayloadCodec, PayloadError, Value, element};
use crate::action::{ActionContext, ActionError, ActionTransition};
use crate::address::Address;
use crate::config::GameConfig;
use crate::env::{GameEnv, PcgRandom, RandomSource};
use crate::repository::AvatarRepository;
use crate::state::{Item, ItemSubType, ItemType, NonFungibleId, WorldState};
use crate::synthesis::{self, SynthesisResult};

use super::owned_avatar;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SynthesizeAction {
    pub avatar: Address,
    /// Sorted, without duplicates.
    material_ids: Vec<NonFungibleId>,
}

impl SynthesizeAction {
    /// Canonicalizes `material_ids` (sorted, duplicates dropped).
    pub fn new(avatar: Address, mut material_ids: Vec<NonFungibleId>) -> Self {
        material_ids.sort();
        material_ids.dedup();
        Self {
            avatar,
            material_ids,
        }
    }

    pub fn material_ids(&self) -> &[NonFungibleId] {
        &self.material_ids
    }

    /// Loads and checks every material without touching the RNG.
    fn collect_materials(
        &self,
        state: &WorldState,
        signer: Address,
        block_index: u64,
    ) -> Result<Vec<Item>, ActionError> {
        owned_avatar(state, signer, self.avatar)?;
        let inventory = AvatarRepository::new(state).inventory(&self.avatar)?;

        let mut batch_sub_type: Option<ItemSubType> = None;
        let mut materials = Vec::with_capacity(self.material_ids.len());
        for id in &self.material_ids {
            let item = inventory
                .find_non_fungible(id)
                .ok_or(ActionError::MaterialNotFound { id: *id })?;

            let sub_type = item.item_sub_type();
            if !matches!(item.item_type(), ItemType::Equipment | ItemType::Costume) {
                return Err(ActionError::NotSynthesizable { id: *id, sub_type });
            }
            match batch_sub_type {
                Some(expected) if expected != sub_type => {
                    return Err(ActionError::MixedSubTypes {
                        expected,
                        found: sub_type,
                    });
                }
                _ => batch_sub_type = Some(sub_type),
            }
            if !item.is_unlocked_at(block_index) {
                return Err(ActionError::ItemLocked {
                    id: *id,
                    grade: item.grade(),
                    required_block_index: item.required_block_index().unwrap_or_default(),
                });
            }

            materials.push(item.clone());
        }
        Ok(materials)
    }

    /// Consumes the materials, runs the engine and stores its output.
    fn run<R: RandomSource + ?Sized>(
        &self,
        state: &mut WorldState,
        env: GameEnv<'_>,
        signer: Address,
        block_index: u64,
        rng: &mut R,
    ) -> Result<Vec<SynthesisResult>, ActionError> {
        let materials = self.collect_materials(state, signer, block_index)?;

        let mut inventory = AvatarRepository::new(&*state).inventory(&self.avatar)?;
        for id in &self.material_ids {
            inventory.remove_non_fungible(id);
        }

        let counts = synthesis::tally(&materials);
        let results = synthesis::synthesize(env.sheets(), &counts, block_index, rng)?;
        for result in &results {
            inventory.add_item(result.item().clone(), 1);
        }

        AvatarRepository::new(state).set_inventory(&self.avatar, &inventory)?;
        Ok(results)
    }
}

impl PayloadCodec for SynthesizeAction {
    const TYPE_ID: &'static str = "synthesize";

    fn to_payload(&self) -> Payload {
        let ids = self
            .material_ids
            .iter()
            .map(|id| Value::Bytes(id.0.to_vec()))
            .collect::<Vec<_>>();
        Payload::new()
            .with("avatar", self.avatar)
            .with("material_ids", ids)
    }

    fn from_payload(payload: &Payload) -> Result<Self, PayloadError> {
        let avatar = payload.address("avatar")?;
        let values = payload.list("material_ids")?;
        if values.is_empty() || values.len() > GameConfig::MAX_SYNTHESIS_MATERIALS {
            return Err(PayloadError::out_of_range(
                "material_ids",
                format!(
                    "{} materials, expected 1..={}",
                    values.len(),
                    GameConfig::MAX_SYNTHESIS_MATERIALS
                ),
            ));
        }

        let mut ids = Vec::with_capacity(values.len());
        for value in values {
            let bytes: [u8; 16] = element::bytes("material_ids", value)?
                .try_into()
                .map_err(|_| PayloadError::out_of_range("material_ids", "id must be 16 bytes"))?;
            ids.push(NonFungibleId(bytes));
        }

        let action = Self::new(avatar, ids);
        if action.material_ids.len() != values.len() {
            return Err(PayloadError::out_of_range(
                "material_ids",
                "duplicate material id",
            ));
        }
        Ok(action)
    }
}

impl ActionTransition for SynthesizeAction {
    type Error = ActionError;
    type Result = Vec<SynthesisResult>;

    fn cost(&self, config: &GameConfig) -> u64 {
        config.base_action_cost + config.synthesis_material_cost * self.material_ids.len() as u64
    }

    fn pre_validate(&self, state: &WorldState, ctx: &ActionContext<'_>) -> Result<(), Self::Error> {
        self.collect_materials(state, ctx.signer, ctx.block_index)
            .map(drop)
    }

    fn apply(
        &self,
        state: &mut WorldState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<Self::Result, Self::Error> {
        self.run(state, ctx.env, ctx.signer, ctx.block_index, &mut *ctx.rng)
    }
}

/// Pre-flight simulation of a synthesis with the given seed.
///
/// Leaves `state` untouched. Produces the same results the engine would for an
/// action executed with `random_seed == seed` against the same state.
pub fn simulate_synthesis(
    state: &WorldState,
    env: GameEnv<'_>,
    action: &SynthesizeAction,
    signer: Address,
    block_index: u64,
    seed: u64,
) -> Result<Vec<SynthesisResult>, ActionError> {
    let mut scratch = state.clone();
    let mut rng = PcgRandom::new(seed);
    action.run(&mut scratch, env, signer, block_index, &mut rng)
}
