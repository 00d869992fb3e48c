//! Concrete actions and their registry.
//!
//! [`ActionKind`] is the closed set of actions the engine understands. Decoding
//! dispatches on [`PlainAction::type_id`]; every other operation is a `match`
//! over the variants.

mod arena;
mod asset;
mod avatar;
mod guild;
mod synthesize;
mod validator;

pub use arena::JoinArenaAction;
pub use asset::{MintAssetsAction, TransferAssetAction};
pub use avatar::CreateAvatarAction;
pub use guild::{JoinGuildAction, MakeGuildAction};
pub use synthesize::{SynthesizeAction, simulate_synthesis};
pub use validator::{UpdateValidatorsAction, ValidatorSetChange};

use serde::{Deserialize, Serialize};

use super::payload::{PayloadCodec, PayloadError, PlainAction};
use super::{ActionError, ActionTransition};
use crate::address::Address;
use crate::config::GameConfig;
use crate::repository::{AgentRepository, AvatarRepository};
use crate::state::{AvatarState, WorldState};
use crate::synthesis::SynthesisResult;

/// Loads `avatar` after checking that `signer`'s agent owns it.
pub(crate) fn owned_avatar(
    state: &WorldState,
    signer: Address,
    avatar: Address,
) -> Result<AvatarState, ActionError> {
    let agent = AgentRepository::new(state).agent_or_new(&signer)?;
    if !agent.owns(&avatar) {
        return Err(ActionError::NotOwner { signer, avatar });
    }
    AvatarRepository::new(state)
        .avatar(&avatar)?
        .ok_or(ActionError::AvatarNotFound { avatar })
}

/// Every action the engine can execute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionKind {
    CreateAvatar(CreateAvatarAction),
    Synthesize(SynthesizeAction),
    TransferAsset(TransferAssetAction),
    MintAssets(MintAssetsAction),
    JoinArena(JoinArenaAction),
    UpdateValidators(UpdateValidatorsAction),
    MakeGuild(MakeGuildAction),
    JoinGuild(JoinGuildAction),
}

impl ActionKind {
    pub fn decode(action: &PlainAction) -> Result<Self, PayloadError> {
        let payload = &action.payload;
        let kind = match action.type_id.as_str() {
            id if id == CreateAvatarAction::TYPE_ID => {
                Self::CreateAvatar(CreateAvatarAction::from_payload(payload)?)
            }
            id if id == SynthesizeAction::TYPE_ID => {
                Self::Synthesize(SynthesizeAction::from_payload(payload)?)
            }
            id if id == TransferAssetAction::TYPE_ID => {
                Self::TransferAsset(TransferAssetAction::from_payload(payload)?)
            }
            id if id == MintAssetsAction::TYPE_ID => {
                Self::MintAssets(MintAssetsAction::from_payload(payload)?)
            }
            id if id == JoinArenaAction::TYPE_ID => {
                Self::JoinArena(JoinArenaAction::from_payload(payload)?)
            }
            id if id == UpdateValidatorsAction::TYPE_ID => {
                Self::UpdateValidators(UpdateValidatorsAction::from_payload(payload)?)
            }
            id if id == MakeGuildAction::TYPE_ID => {
                Self::MakeGuild(MakeGuildAction::from_payload(payload)?)
            }
            id if id == JoinGuildAction::TYPE_ID => {
                Self::JoinGuild(JoinGuildAction::from_payload(payload)?)
            }
            other => {
                return Err(PayloadError::UnknownType {
                    type_id: other.to_owned(),
                });
            }
        };
        Ok(kind)
    }

    pub fn to_plain(&self) -> PlainAction {
        match self {
            Self::CreateAvatar(action) => action.to_plain(),
            Self::Synthesize(action) => action.to_plain(),
            Self::TransferAsset(action) => action.to_plain(),
            Self::MintAssets(action) => action.to_plain(),
            Self::JoinArena(action) => action.to_plain(),
            Self::UpdateValidators(action) => action.to_plain(),
            Self::MakeGuild(action) => action.to_plain(),
            Self::JoinGuild(action) => action.to_plain(),
        }
    }

    pub fn type_id(&self) -> &'static str {
        match self {
            Self::CreateAvatar(_) => CreateAvatarAction::TYPE_ID,
            Self::Synthesize(_) => SynthesizeAction::TYPE_ID,
            Self::TransferAsset(_) => TransferAssetAction::TYPE_ID,
            Self::MintAssets(_) => MintAssetsAction::TYPE_ID,
            Self::JoinArena(_) => JoinArenaAction::TYPE_ID,
            Self::UpdateValidators(_) => UpdateValidatorsAction::TYPE_ID,
            Self::MakeGuild(_) => MakeGuildAction::TYPE_ID,
            Self::JoinGuild(_) => JoinGuildAction::TYPE_ID,
        }
    }

    /// Gas this action is charged before execution starts.
    pub fn cost(&self, config: &GameConfig) -> u64 {
        match self {
            Self::CreateAvatar(action) => action.cost(config),
            Self::Synthesize(action) => action.cost(config),
            Self::TransferAsset(action) => action.cost(config),
            Self::MintAssets(action) => action.cost(config),
            Self::JoinArena(action) => action.cost(config),
            Self::UpdateValidators(action) => action.cost(config),
            Self::MakeGuild(action) => action.cost(config),
            Self::JoinGuild(action) => action.cost(config),
        }
    }
}

macro_rules! impl_from_action {
    ($($action:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$action> for ActionKind {
                fn from(action: $action) -> Self {
                    Self::$variant(action)
                }
            }
        )*
    };
}

impl_from_action! {
    CreateAvatarAction => CreateAvatar,
    SynthesizeAction => Synthesize,
    TransferAssetAction => TransferAsset,
    MintAssetsAction => MintAssets,
    JoinArenaAction => JoinArena,
    UpdateValidatorsAction => UpdateValidators,
    MakeGuildAction => MakeGuild,
    JoinGuildAction => JoinGuild,
}

/// Action-specific outcome of an applied action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionResult {
    AvatarCreated { avatar: Address },
    Synthesized(Vec<SynthesisResult>),
    Transferred,
    Minted { total: u128 },
    ArenaJoined,
    ValidatorsUpdated(ValidatorSetChange),
    GuildCreated { guild: Address },
    GuildJoined { guild: Address },
}
