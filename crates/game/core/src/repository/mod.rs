//! Typed views over [`WorldState`].
//!
//! Each repository wraps a snapshot handle: anything `AsRef<WorldState>` for
//! reads (`&WorldState`), `AsMut<WorldState>` for writes (`&mut WorldState`).
//! Repositories know their own address scheme ([`keys`]) and record codec;
//! stored bytes that fail to decode surface as [`StateError::Deserialize`].
//!
//! Mutually referencing domains (guilds and validators) never hold each other's
//! records. Cross-updates re-enter the other repository by address.
mod agent;
mod arena;
mod avatar;
mod delegation;
pub mod keys;

pub use agent::AgentRepository;
pub use arena::ArenaRepository;
pub use avatar::AvatarRepository;
pub use delegation::{GuildRepository, ValidatorRepository};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::address::Address;
use crate::state::codec::{decode_record, encode_record};
use crate::state::{StateError, WorldState};

fn load<T: DeserializeOwned>(state: &WorldState, address: Address) -> Result<Option<T>, StateError> {
    state
        .get_state(&address)
        .map(|bytes| decode_record(address, bytes))
        .transpose()
}

fn store<T: Serialize>(
    state: &mut WorldState,
    address: Address,
    record: &T,
) -> Result<(), StateError> {
    let bytes = encode_record(address, record)?;
    state.set_state(address, bytes);
    Ok(())
}
