//! Action validation errors.
//!
//! Every action transition fails with [`ActionError`]. Errors raised by the
//! layers below (snapshot primitives, synthesis engine) are wrapped as-is so
//! their kind and code survive up to the rejection report.

use crate::address::Address;
use crate::error::{ErrorKind, GameError};
use crate::state::{Grade, ItemSubType, NonFungibleId, StateError};
use crate::synthesis::SynthesisError;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    // ===== ownership & authority =====
    #[error("{signer} does not own avatar {avatar}")]
    NotOwner { signer: Address, avatar: Address },

    #[error("{signer} may not submit system actions")]
    SystemOnly { signer: Address },

    // ===== registration =====
    #[error("slot {slot} of {agent} is already taken")]
    SlotOccupied { agent: Address, slot: u8 },

    #[error("address {address} is already claimed")]
    AddressClaimed { address: Address },

    #[error("{member} is already registered in {record}")]
    AlreadyJoined { member: Address, record: Address },

    // ===== materials =====
    #[error("material {id} is not in the inventory")]
    MaterialNotFound { id: NonFungibleId },

    #[error("material {id} is a {sub_type}, which cannot be synthesized")]
    NotSynthesizable { id: NonFungibleId, sub_type: ItemSubType },

    #[error("batch mixes {expected} and {found}")]
    MixedSubTypes {
        expected: ItemSubType,
        found: ItemSubType,
    },

    #[error("material {id} ({grade}) is locked until block {required_block_index}")]
    ItemLocked {
        id: NonFungibleId,
        grade: Grade,
        required_block_index: u64,
    },

    // ===== targets & configuration =====
    #[error("avatar {avatar} does not exist")]
    AvatarNotFound { avatar: Address },

    #[error("guild {guild} does not exist")]
    GuildNotFound { guild: Address },

    #[error("validator {validator} is not active")]
    ValidatorInactive { validator: Address },

    #[error("currency {ticker} is not configured")]
    UnknownCurrency { ticker: String },

    #[error("arena round {championship_id}/{round} is not configured")]
    ArenaRoundMissing { championship_id: u32, round: u32 },

    #[error("arena round {championship_id}/{round} is not open at block {block_index}")]
    ArenaRoundClosed {
        championship_id: u32,
        round: u32,
        block_index: u64,
    },

    // ===== invariants =====
    #[error("validator {validator} activation out of order")]
    ActivationOutOfOrder { validator: Address },

    #[error("{ticker} supply or balances changed unexpectedly")]
    ConservationViolated { ticker: String },
}

impl GameError for ActionError {
    fn kind(&self) -> ErrorKind {
        use ActionError::*;
        match self {
            State(error) => error.kind(),
            Synthesis(error) => error.kind(),
            NotOwner { .. } | SystemOnly { .. } => ErrorKind::Unauthorized,
            SlotOccupied { .. } | AddressClaimed { .. } | AlreadyJoined { .. } => {
                ErrorKind::DuplicateRegistration
            }
            MaterialNotFound { .. } | NotSynthesizable { .. } | MixedSubTypes { .. } => {
                ErrorKind::InvalidMaterial
            }
            ItemLocked { .. } => ErrorKind::NotYetUnlocked,
            AvatarNotFound { .. } | GuildNotFound { .. } | ValidatorInactive { .. } => {
                ErrorKind::InvalidTarget
            }
            UnknownCurrency { .. } | ArenaRoundMissing { .. } | ArenaRoundClosed { .. } => {
                ErrorKind::ConfigurationMissing
            }
            ActivationOutOfOrder { .. } | ConservationViolated { .. } => {
                ErrorKind::InternalInconsistency
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            State(error) => error.error_code(),
            Synthesis(error) => error.error_code(),
            NotOwner { .. } => "ACTION_NOT_OWNER",
            SystemOnly { .. } => "ACTION_SYSTEM_ONLY",
            SlotOccupied { .. } => "ACTION_SLOT_OCCUPIED",
            AddressClaimed { .. } => "ACTION_ADDRESS_CLAIMED",
            AlreadyJoined { .. } => "ACTION_ALREADY_JOINED",
            MaterialNotFound { .. } => "ACTION_MATERIAL_NOT_FOUND",
            NotSynthesizable { .. } => "ACTION_NOT_SYNTHESIZABLE",
            MixedSubTypes { .. } => "ACTION_MIXED_SUBTYPES",
            ItemLocked { .. } => "ACTION_ITEM_LOCKED",
            AvatarNotFound { .. } => "ACTION_AVATAR_NOT_FOUND",
            GuildNotFound { .. } => "ACTION_GUILD_NOT_FOUND",
            ValidatorInactive { .. } => "ACTION_VALIDATOR_INACTIVE",
            UnknownCurrency { .. } => "ACTION_UNKNOWN_CURRENCY",
            ArenaRoundMissing { .. } => "ACTION_ARENA_ROUND_MISSING",
            ArenaRoundClosed { .. } => "ACTION_ARENA_ROUND_CLOSED",
            ActivationOutOfOrder { .. } => "ACTION_ACTIVATION_OUT_OF_ORDER",
            ConservationViolated { .. } => "ACTION_CONSERVATION_VIOLATED",
        }
    }
}
