use crate::action::payload::{Payload, PayloadCodec, PayloadError};
use crate::action::{ActionContext, ActionError, ActionTransition};
use crate::address::Address;
use crate::config::GameConfig;
use crate::repository::keys::avatar_address;
use crate::repository::{AgentRepository, AvatarRepository};
use crate::state::{AvatarState, Inventory, WorldState};

/// Registers a new avatar in one of the signer's slots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateAvatarAction {
    pub slot: u8,
    pub name: String,
}

impl CreateAvatarAction {
    pub fn new(slot: u8, name: impl Into<String>) -> Self {
        Self {
            slot,
            name: name.into(),
        }
    }
}

impl PayloadCodec for CreateAvatarAction {
    const TYPE_ID: &'static str = "create_avatar";

    fn to_payload(&self) -> Payload {
        Payload::new()
            .with("slot", i64::from(self.slot))
            .with("name", self.name.as_str())
    }

    fn from_payload(payload: &Payload) -> Result<Self, PayloadError> {
        let slot: u8 = payload.unsigned("slot")?;
        if slot >= GameConfig::MAX_AVATAR_SLOTS {
            return Err(PayloadError::out_of_range(
                "slot",
                format!("{slot} exceeds {}", GameConfig::MAX_AVATAR_SLOTS - 1),
            ));
        }

        let name = payload.text("name")?;
        let length = name.chars().count();
        if !(GameConfig::MIN_AVATAR_NAME_LEN..=GameConfig::MAX_AVATAR_NAME_LEN).contains(&length) {
            return Err(PayloadError::out_of_range(
                "name",
                format!("{length} characters"),
            ));
        }
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(PayloadError::out_of_range("name", "unsupported characters"));
        }

        Ok(Self::new(slot, name))
    }
}

impl ActionTransition for CreateAvatarAction {
    type Error = ActionError;
    type Result = Address;

    fn pre_validate(&self, state: &WorldState, ctx: &ActionContext<'_>) -> Result<(), Self::Error> {
        let agent = AgentRepository::new(state).agent_or_new(&ctx.signer)?;
        if agent.avatars.contains_key(&self.slot) {
            return Err(ActionError::SlotOccupied {
                agent: ctx.signer,
                slot: self.slot,
            });
        }

        let address = avatar_address(&ctx.signer, self.slot);
        if state.contains(&address) {
            return Err(ActionError::AddressClaimed { address });
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut WorldState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<Self::Result, Self::Error> {
        let address = avatar_address(&ctx.signer, self.slot);

        let mut agent = AgentRepository::new(&*state).agent_or_new(&ctx.signer)?;
        agent.avatars.insert(self.slot, address);
        AgentRepository::new(&mut *state).set_agent(&agent)?;

        let avatar = AvatarState::new(address, ctx.signer, self.name.clone(), ctx.block_index);
        let mut avatars = AvatarRepository::new(state);
        avatars.set_avatar(&avatar)?;
        avatars.set_inventory(&address, &Inventory::new())?;

        Ok(address)
    }
}
