//! Unified error types surfaced by the runtime API.
//!
//! Individual action rejections are not errors at this level; they become
//! rejected receipts. A `RuntimeError` means a whole block could not be applied.
use thiserror::Error;

use game_core::PayloadError;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("block {index} carries {count} actions, limit is {max}")]
    BlockTooLarge { index: u64, count: usize, max: usize },

    #[error("expected block {expected}, got {found}")]
    BlockOutOfOrder { expected: u64, found: u64 },

    #[error("no snapshot stored for block {block_index}")]
    MissingState { block_index: u64 },

    #[error("block encoding failed: {0}")]
    Encoding(String),

    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
