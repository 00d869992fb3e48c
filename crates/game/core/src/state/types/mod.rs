//! Record types stored in the world state.
mod arena;
mod avatar;
mod delegation;
mod inventory;
mod item;

pub use arena::{ArenaParticipant, ArenaParticipants};
pub use avatar::{AgentState, AvatarState};
pub use delegation::{
    DelegateeStatus, Guild, GuildParticipant, Validator, ValidatorDelegatee, ValidatorSet,
};
pub use inventory::{Inventory, InventoryEntry};
pub use item::{
    Costume, Equipment, FungibleId, Grade, Item, ItemBase, ItemOption, ItemSubType, ItemType,
    Material, NonFungibleId, RecipeRef, StatType,
};
