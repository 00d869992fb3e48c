use super::keys::inventory_address;
use super::{load, store};
use crate::address::Address;
use crate::state::{AvatarState, Inventory, StateError, WorldState};

/// Avatar records and the inventory stored next to each avatar.
pub struct AvatarRepository<S> {
    state: S,
}

impl<S> AvatarRepository<S> {
    pub fn new(state: S) -> Self {
        Self { state }
    }
}

impl<S: AsRef<WorldState>> AvatarRepository<S> {
    pub fn avatar(&self, address: &Address) -> Result<Option<AvatarState>, StateError> {
        load(self.state.as_ref(), *address)
    }

    /// Like [`avatar`](Self::avatar) but absence is an error.
    pub fn require_avatar(&self, address: &Address) -> Result<AvatarState, StateError> {
        self.avatar(address)?
            .ok_or(StateError::MissingRecord { address: *address })
    }

    /// Inventory of `avatar`; an avatar that never received items has an empty one.
    pub fn inventory(&self, avatar: &Address) -> Result<Inventory, StateError> {
        Ok(load(self.state.as_ref(), inventory_address(avatar))?.unwrap_or_default())
    }
}

impl<S: AsMut<WorldState>> AvatarRepository<S> {
    pub fn set_avatar(&mut self, avatar: &AvatarState) -> Result<(), StateError> {
        store(self.state.as_mut(), avatar.address, avatar)
    }

    pub fn set_inventory(&mut self, avatar: &Address, inventory: &Inventory) -> Result<(), StateError> {
        store(self.state.as_mut(), inventory_address(avatar), inventory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_avatar_reports_missing_record() {
        let state = WorldState::new();
        let address = Address::new([4; 20]);
        let error = AvatarRepository::new(&state)
            .require_avatar(&address)
            .unwrap_err();
        assert_eq!(error, StateError::MissingRecord { address });
    }

    #[test]
    fn inventory_defaults_to_empty() {
        let state = WorldState::new();
        let inventory = AvatarRepository::new(&state)
            .inventory(&Address::new([4; 20]))
            .unwrap();
        assert!(inventory.is_empty());
    }
}
