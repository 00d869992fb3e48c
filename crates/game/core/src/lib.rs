//! Deterministic ledger game logic and data types.
//!
//! `game-core` defines the canonical rules (actions, engine, world state) and
//! exposes pure APIs that can be reused by both the runtime and offline tools.
//! All state mutation flows through [`engine::GameEngine`], and supporting
//! crates depend on the types re-exported here.
pub mod action;
pub mod address;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod repository;
pub mod state;
pub mod synthesis;

pub use action::{
    ActionContext, ActionError, ActionKind, ActionResult, ActionTransition, CreateAvatarAction,
    GasError, GasMeter, JoinArenaAction, JoinGuildAction, MakeGuildAction, MintAssetsAction,
    Payload, PayloadCodec, PayloadError, PlainAction, SynthesizeAction, TransferAssetAction,
    UpdateValidatorsAction, Value, ValidatorSetChange, compute_actions_root, simulate_synthesis,
};
pub use address::{Address, AddressParseError};
pub use config::GameConfig;
pub use engine::{
    ActionEvaluation, ActionFailure, ActionInput, ActionOutput, ExecuteError, GameEngine,
    TransitionPhase, TransitionPhaseError,
};
pub use env::{GameEnv, PcgRandom, RandomSource, SheetOracle, TablesSnapshot, compute_seed};
pub use error::{ErrorKind, ErrorSeverity, GameError};
pub use state::{
    Currency, FungibleAssetValue, Grade, Item, ItemSubType, NonFungibleId, StateDelta,
    StateError, WorldState,
};
pub use synthesis::{SynthesisError, SynthesisResult};
