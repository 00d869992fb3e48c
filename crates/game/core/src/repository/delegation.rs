//! Validator delegation and guild repositories.
//!
//! A guild points at its validator by address, and a delegatee lists its guilds
//! by address. [`GuildRepository`] updates the delegatee side by constructing a
//! [`ValidatorRepository`] over the same snapshot handle.

use super::keys::{
    delegatee_address, guild_address, guild_participant_address, validator_set_address,
};
use super::{load, store};
use crate::address::Address;
use crate::state::{
    Guild, GuildParticipant, StateError, ValidatorDelegatee, ValidatorSet, WorldState,
};

pub struct ValidatorRepository<S> {
    state: S,
}

impl<S> ValidatorRepository<S> {
    pub fn new(state: S) -> Self {
        Self { state }
    }
}

impl<S: AsRef<WorldState>> ValidatorRepository<S> {
    /// Last validator set reported by the host; empty before the first report.
    pub fn validator_set(&self) -> Result<ValidatorSet, StateError> {
        Ok(load(self.state.as_ref(), validator_set_address())?.unwrap_or_default())
    }

    pub fn delegatee(&self, validator: &Address) -> Result<Option<ValidatorDelegatee>, StateError> {
        load(self.state.as_ref(), delegatee_address(validator))
    }
}

impl<S: AsMut<WorldState>> ValidatorRepository<S> {
    pub fn set_validator_set(&mut self, set: &ValidatorSet) -> Result<(), StateError> {
        store(self.state.as_mut(), validator_set_address(), set)
    }

    pub fn set_delegatee(&mut self, delegatee: &ValidatorDelegatee) -> Result<(), StateError> {
        store(
            self.state.as_mut(),
            delegatee_address(&delegatee.validator),
            delegatee,
        )
    }
}

impl<S: AsRef<WorldState> + AsMut<WorldState>> ValidatorRepository<S> {
    /// Records `guild` as a delegator of `validator`.
    pub fn add_delegator(&mut self, validator: &Address, guild: Address) -> Result<(), StateError> {
        let mut delegatee = self
            .delegatee(validator)?
            .ok_or(StateError::MissingRecord {
                address: delegatee_address(validator),
            })?;
        delegatee.delegators.insert(guild);
        self.set_delegatee(&delegatee)
    }
}

pub struct GuildRepository<S> {
    state: S,
}

impl<S> GuildRepository<S> {
    pub fn new(state: S) -> Self {
        Self { state }
    }
}

impl<S: AsRef<WorldState>> GuildRepository<S> {
    pub fn guild(&self, address: &Address) -> Result<Option<Guild>, StateError> {
        load(self.state.as_ref(), *address)
    }

    /// Guild led by `master`, if any.
    pub fn guild_of_master(&self, master: &Address) -> Result<Option<Guild>, StateError> {
        self.guild(&guild_address(master))
    }

    pub fn participant(&self, agent: &Address) -> Result<Option<GuildParticipant>, StateError> {
        load(self.state.as_ref(), guild_participant_address(agent))
    }
}

impl<S: AsRef<WorldState> + AsMut<WorldState>> GuildRepository<S> {
    /// Writes a new guild, its master's membership, and bonds it to its validator.
    pub fn create_guild(&mut self, guild: &Guild) -> Result<(), StateError> {
        store(self.state.as_mut(), guild.address, guild)?;
        self.set_participant(&GuildParticipant {
            agent: guild.master,
            guild: guild.address,
        })?;
        ValidatorRepository::new(self.state.as_mut()).add_delegator(&guild.validator, guild.address)
    }

    pub fn add_member(&mut self, guild_address: &Address, agent: Address) -> Result<(), StateError> {
        let mut guild = self
            .guild(guild_address)?
            .ok_or(StateError::MissingRecord {
                address: *guild_address,
            })?;
        guild.members.insert(agent);
        store(self.state.as_mut(), guild.address, &guild)?;
        self.set_participant(&GuildParticipant {
            agent,
            guild: guild.address,
        })
    }

    fn set_participant(&mut self, participant: &GuildParticipant) -> Result<(), StateError> {
        store(
            self.state.as_mut(),
            guild_participant_address(&participant.agent),
            participant,
        )
    }
}
