//! Agent and avatar records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::state::codec::block_index;

/// Account-level record listing the avatars an agent registered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentState {
    pub address: Address,
    /// Slot index -> avatar address.
    #[serde(default)]
    pub avatars: BTreeMap<u8, Address>,
}

impl AgentState {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            avatars: BTreeMap::new(),
        }
    }

    pub fn owns(&self, avatar: &Address) -> bool {
        self.avatars.values().any(|owned| owned == avatar)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarState {
    pub address: Address,
    pub agent_address: Address,
    pub name: String,
    /// Records written before levels existed decode as level 1.
    #[serde(default = "AvatarState::initial_level")]
    pub level: u32,
    #[serde(default)]
    pub exp: u64,
    #[serde(with = "block_index")]
    pub created_at: u64,
    #[serde(with = "block_index")]
    pub updated_at: u64,
}

impl AvatarState {
    pub fn new(address: Address, agent_address: Address, name: String, block_index: u64) -> Self {
        Self {
            address,
            agent_address,
            name,
            level: Self::initial_level(),
            exp: 0,
            created_at: block_index,
            updated_at: block_index,
        }
    }

    fn initial_level() -> u32 {
        1
    }
}
