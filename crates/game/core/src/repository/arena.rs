use super::keys::{arena_participant_address, arena_participants_address};
use super::{load, store};
use crate::address::Address;
use crate::state::{ArenaParticipant, ArenaParticipants, StateError, WorldState};

/// Arena records, keyed by `(championship, round)`.
pub struct ArenaRepository<S> {
    state: S,
}

impl<S> ArenaRepository<S> {
    pub fn new(state: S) -> Self {
        Self { state }
    }
}

impl<S: AsRef<WorldState>> ArenaRepository<S> {
    /// Participant list of a round; empty when nobody has joined yet.
    pub fn participants(
        &self,
        championship_id: u32,
        round: u32,
    ) -> Result<ArenaParticipants, StateError> {
        Ok(load(
            self.state.as_ref(),
            arena_participants_address(championship_id, round),
        )?
        .unwrap_or_else(|| ArenaParticipants::new(championship_id, round)))
    }

    pub fn participant(
        &self,
        avatar: &Address,
        championship_id: u32,
        round: u32,
    ) -> Result<Option<ArenaParticipant>, StateError> {
        load(
            self.state.as_ref(),
            arena_participant_address(avatar, championship_id, round),
        )
    }
}

impl<S: AsMut<WorldState>> ArenaRepository<S> {
    pub fn set_participants(&mut self, participants: &ArenaParticipants) -> Result<(), StateError> {
        let address =
            arena_participants_address(participants.championship_id, participants.round);
        store(self.state.as_mut(), address, participants)
    }

    pub fn set_participant(
        &mut self,
        participant: &ArenaParticipant,
        championship_id: u32,
        round: u32,
    ) -> Result<(), StateError> {
        let address =
            arena_participant_address(&participant.avatar_address, championship_id, round);
        store(self.state.as_mut(), address, participant)
    }
}
