//! Error types raised by repository implementations.

use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("state repository lock was poisoned")]
    LockPoisoned,

    #[error("snapshot for block {block_index} already stored")]
    AlreadyStored { block_index: u64 },
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
