//! Arena participation records.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::config::GameConfig;
use crate::state::codec::optional_block_index;

/// Avatars registered for one `(championship, round)`, in join order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaParticipants {
    pub championship_id: u32,
    pub round: u32,
    #[serde(default)]
    pub avatars: Vec<Address>,
}

impl ArenaParticipants {
    pub fn new(championship_id: u32, round: u32) -> Self {
        Self {
            championship_id,
            round,
            avatars: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaParticipant {
    pub avatar_address: Address,
    pub name: String,
    pub level: u32,
    pub score: i32,
    pub tickets: u32,
    /// Block at which tickets were last refilled. Absent until the first
    /// refill; a negative value is rejected at decode time.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "optional_block_index"
    )]
    pub ticket_reset_block: Option<u64>,
}

impl ArenaParticipant {
    pub fn new(avatar_address: Address, name: String, level: u32) -> Self {
        Self {
            avatar_address,
            name,
            level,
            score: GameConfig::ARENA_INITIAL_SCORE,
            tickets: GameConfig::ARENA_INITIAL_TICKETS,
            ticket_reset_block: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StateError;
    use crate::state::codec::{decode_record, encode_record};

    #[test]
    fn fresh_participant_omits_reset_block() {
        let participant = ArenaParticipant::new(Address::ZERO, "alice".into(), 1);
        let bytes = encode_record(Address::ZERO, &participant).unwrap();
        assert!(!String::from_utf8(bytes.clone()).unwrap().contains("ticket_reset_block"));

        let decoded: ArenaParticipant = decode_record(Address::ZERO, &bytes).unwrap();
        assert_eq!(decoded, participant);
    }

    #[test]
    fn negative_reset_block_is_rejected() {
        let mut participant = ArenaParticipant::new(Address::ZERO, "alice".into(), 1);
        participant.ticket_reset_block = Some(7);
        let json = String::from_utf8(encode_record(Address::ZERO, &participant).unwrap())
            .unwrap()
            .replace("\"ticket_reset_block\":7", "\"ticket_reset_block\":-7");

        let error = decode_record::<ArenaParticipant>(Address::ZERO, json.as_bytes()).unwrap_err();
        assert!(matches!(error, StateError::Deserialize { .. }));
    }
}
