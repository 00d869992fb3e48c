use crate::action::payload::{Payload, PayloadCodec, PayloadError};
use crate::action::{ActionContext, ActionError, ActionTransition};
use crate::address::Address;
use crate::env::ArenaRow;
use crate::repository::ArenaRepository;
use crate::repository::keys::arena_fee_pool_address;
use crate::state::{ArenaParticipant, Currency, FungibleAssetValue, WorldState};

use super::owned_avatar;

/// Registers an avatar in an open arena round and pays its entrance fee.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JoinArenaAction {
    pub avatar: Address,
    pub championship_id: u32,
    pub round: u32,
}

impl JoinArenaAction {
    fn open_round<'s>(&self, ctx: &ActionContext<'s>) -> Result<(&'s ArenaRow, &'s Currency), ActionError> {
        let sheets = ctx.env.sheets();
        let row = sheets
            .arena_round(self.championship_id, self.round)
            .ok_or(ActionError::ArenaRoundMissing {
                championship_id: self.championship_id,
                round: self.round,
            })?;
        if !row.is_open_at(ctx.block_index) {
            return Err(ActionError::ArenaRoundClosed {
                championship_id: self.championship_id,
                round: self.round,
                block_index: ctx.block_index,
            });
        }
        let currency = sheets
            .currency(&row.ticker)
            .ok_or_else(|| ActionError::UnknownCurrency {
                ticker: row.ticker.clone(),
            })?;
        Ok((row, currency))
    }
}

impl PayloadCodec for JoinArenaAction {
    const TYPE_ID: &'static str = "join_arena";

    fn to_payload(&self) -> Payload {
        Payload::new()
            .with("avatar", self.avatar)
            .with("championship_id", i64::from(self.championship_id))
            .with("round", i64::from(self.round))
    }

    fn from_payload(payload: &Payload) -> Result<Self, PayloadError> {
        Ok(Self {
            avatar: payload.address("avatar")?,
            championship_id: payload.unsigned("championship_id")?,
            round: payload.unsigned("round")?,
        })
    }
}

impl ActionTransition for JoinArenaAction {
    type Error = ActionError;
    type Result = ();

    fn pre_validate(&self, state: &WorldState, ctx: &ActionContext<'_>) -> Result<(), Self::Error> {
        owned_avatar(state, ctx.signer, self.avatar)?;
        self.open_round(ctx)?;

        let arena = ArenaRepository::new(state);
        if arena
            .participant(&self.avatar, self.championship_id, self.round)?
            .is_some()
        {
            return Err(ActionError::AlreadyJoined {
                member: self.avatar,
                record: arena_fee_pool_address(self.championship_id, self.round),
            });
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut WorldState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<Self::Result, Self::Error> {
        let avatar = owned_avatar(state, ctx.signer, self.avatar)?;
        let (row, currency) = self.open_round(ctx)?;

        if row.entrance_fee > 0 {
            state.transfer(
                ctx.signer,
                arena_fee_pool_address(self.championship_id, self.round),
                &FungibleAssetValue::new(currency.clone(), row.entrance_fee),
            )?;
        }

        let mut participants =
            ArenaRepository::new(&*state).participants(self.championship_id, self.round)?;
        participants.avatars.push(self.avatar);

        let mut arena = ArenaRepository::new(state);
        arena.set_participants(&participants)?;
        arena.set_participant(
            &ArenaParticipant::new(self.avatar, avatar.name, avatar.level),
            self.championship_id,
            self.round,
        )?;
        Ok(())
    }
}
