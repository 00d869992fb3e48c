//! Block execution runtime for the deterministic ledger game.
//!
//! The host delivers ordered blocks of signed actions. This crate derives the
//! per-action seeds, runs every action through [`game_core::GameEngine`],
//! collects receipts, and keeps one snapshot per block.
//!
//! Modules are organized by responsibility:
//! - [`block`] defines blocks and transactions as delivered by the host
//! - [`executor`] applies a block to a snapshot
//! - [`runtime`] tracks the tip and persists snapshots through [`repository`]
//! - [`logging`] installs the tracing subscriber used by binaries and tests
pub mod block;
pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod repository;
pub mod runtime;
pub mod utils;

pub use block::{Block, Transaction};
pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use executor::{BlockExecutor, BlockOutcome, Receipt, ReceiptStatus};
pub use repository::{InMemoryStateRepo, RepositoryError, StateRepository};
pub use runtime::{Runtime, RuntimeBuilder};
