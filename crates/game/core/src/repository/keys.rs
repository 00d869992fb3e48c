//! Address scheme for every record the repositories manage.

use crate::address::Address;

pub fn avatar_address(agent: &Address, slot: u8) -> Address {
    agent.derive(format!("avatar-state-{slot}"))
}

pub fn inventory_address(avatar: &Address) -> Address {
    avatar.derive("inventory")
}

pub fn arena_participants_address(championship_id: u32, round: u32) -> Address {
    Address::namespace("arena").derive(format!("participants-{championship_id}-{round}"))
}

pub fn arena_participant_address(avatar: &Address, championship_id: u32, round: u32) -> Address {
    avatar.derive(format!("arena-participant-{championship_id}-{round}"))
}

/// Account collecting entrance fees of one round.
pub fn arena_fee_pool_address(championship_id: u32, round: u32) -> Address {
    Address::namespace("arena").derive(format!("fee-pool-{championship_id}-{round}"))
}

pub fn validator_set_address() -> Address {
    Address::namespace("validator_set")
}

pub fn delegatee_address(validator: &Address) -> Address {
    Address::namespace("validator_delegatee").derive(validator.as_bytes())
}

pub fn guild_address(master: &Address) -> Address {
    Address::namespace("guild").derive(master.as_bytes())
}

pub fn guild_participant_address(agent: &Address) -> Address {
    Address::namespace("guild_participant").derive(agent.as_bytes())
}
