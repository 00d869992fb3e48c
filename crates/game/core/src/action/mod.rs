//! Action domain.
//!
//! # Module Structure
//!
//! - `payload`: plain payload model (`PlainAction`, `Value`) and the typed codec
//! - `transition`: three-phase [`ActionTransition`] contract and its context
//! - `error`: [`ActionError`], the failure type of every transition
//! - `gas`: per-action cost metering
//! - `root`: commitment over an ordered batch of actions
//! - `kinds`: the concrete actions and the [`ActionKind`] registry

pub mod error;
pub mod gas;
pub mod kinds;
pub mod payload;
pub mod root;
pub mod transition;

pub use error::ActionError;
pub use gas::{GasError, GasMeter};
pub use kinds::{
    ActionKind, ActionResult, CreateAvatarAction, JoinArenaAction, JoinGuildAction,
    MakeGuildAction, MintAssetsAction, SynthesizeAction, TransferAssetAction,
    UpdateValidatorsAction, ValidatorSetChange, simulate_synthesis,
};
pub use payload::{Payload, PayloadCodec, PayloadError, PlainAction, Value};
pub use root::compute_actions_root;
pub use transition::{ActionContext, ActionTransition};
