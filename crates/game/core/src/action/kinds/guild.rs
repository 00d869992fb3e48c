use std::collections::BTreeSet;

use crate::action::payload::{Payload, PayloadCodec, PayloadError};
use crate::action::{ActionContext, ActionError, ActionTransition};
use crate::address::Address;
use crate::repository::keys::guild_address;
use crate::repository::{GuildRepository, ValidatorRepository};
use crate::state::{Guild, WorldState};

fn ensure_unaffiliated(state: &WorldState, agent: Address) -> Result<(), ActionError> {
    if let Some(participant) = GuildRepository::new(state).participant(&agent)? {
        return Err(ActionError::AlreadyJoined {
            member: agent,
            record: participant.guild,
        });
    }
    Ok(())
}

/// Creates a guild led by the signer, delegating to an active validator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MakeGuildAction {
    pub validator: Address,
}

impl PayloadCodec for MakeGuildAction {
    const TYPE_ID: &'static str = "make_guild";

    fn to_payload(&self) -> Payload {
        Payload::new().with("validator", self.validator)
    }

    fn from_payload(payload: &Payload) -> Result<Self, PayloadError> {
        Ok(Self {
            validator: payload.address("validator")?,
        })
    }
}

impl ActionTransition for MakeGuildAction {
    type Error = ActionError;
    type Result = Address;

    fn pre_validate(&self, state: &WorldState, ctx: &ActionContext<'_>) -> Result<(), Self::Error> {
        let address = guild_address(&ctx.signer);
        if state.contains(&address) {
            return Err(ActionError::AddressClaimed { address });
        }
        ensure_unaffiliated(state, ctx.signer)?;

        let active = ValidatorRepository::new(state)
            .delegatee(&self.validator)?
            .is_some_and(|delegatee| delegatee.is_active());
        if !active {
            return Err(ActionError::ValidatorInactive {
                validator: self.validator,
            });
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut WorldState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<Self::Result, Self::Error> {
        let guild = Guild {
            address: guild_address(&ctx.signer),
            master: ctx.signer,
            validator: self.validator,
            members: BTreeSet::from([ctx.signer]),
            created_at: ctx.block_index,
        };
        GuildRepository::new(state).create_guild(&guild)?;
        Ok(guild.address)
    }
}

/// Adds the signer to an existing guild.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JoinGuildAction {
    pub guild: Address,
}

impl PayloadCodec for JoinGuildAction {
    const TYPE_ID: &'static str = "join_guild";

    fn to_payload(&self) -> Payload {
        Payload::new().with("guild", self.guild)
    }

    fn from_payload(payload: &Payload) -> Result<Self, PayloadError> {
        Ok(Self {
            guild: payload.address("guild")?,
        })
    }
}

impl ActionTransition for JoinGuildAction {
    type Error = ActionError;
    type Result = ();

    fn pre_validate(&self, state: &WorldState, ctx: &ActionContext<'_>) -> Result<(), Self::Error> {
        if GuildRepository::new(state).guild(&self.guild)?.is_none() {
            return Err(ActionError::GuildNotFound { guild: self.guild });
        }
        ensure_unaffiliated(state, ctx.signer)
    }

    fn apply(
        &self,
        state: &mut WorldState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<Self::Result, Self::Error> {
        GuildRepository::new(state).add_member(&self.guild, ctx.signer)?;
        Ok(())
    }
}
