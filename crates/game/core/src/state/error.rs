//! World state errors.

use crate::address::Address;
use crate::error::{ErrorKind, GameError};

/// Errors raised by snapshot primitives and repository adapters.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("{account} holds {balance} {ticker}, {required} required")]
    InsufficientFunds {
        account: Address,
        ticker: String,
        balance: u128,
        required: u128,
    },

    #[error("{signer} is not a minter of {ticker}")]
    NotMinter { signer: Address, ticker: String },

    #[error("total supply of {ticker} would overflow")]
    SupplyOverflow { ticker: String },

    #[error("balance of {account} in {ticker} would overflow")]
    BalanceOverflow { account: Address, ticker: String },

    #[error("record at {address} could not be decoded: {reason}")]
    Deserialize { address: Address, reason: String },

    #[error("record for {address} could not be encoded: {reason}")]
    Serialize { address: Address, reason: String },

    #[error("expected record at {address} is missing")]
    MissingRecord { address: Address },
}

impl GameError for StateError {
    fn kind(&self) -> ErrorKind {
        use StateError::*;
        match self {
            InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            NotMinter { .. } => ErrorKind::Unauthorized,
            MissingRecord { .. } => ErrorKind::InvalidTarget,
            SupplyOverflow { .. }
            | BalanceOverflow { .. }
            | Deserialize { .. }
            | Serialize { .. } => ErrorKind::InternalInconsistency,
        }
    }

    fn error_code(&self) -> &'static str {
        use StateError::*;
        match self {
            InsufficientFunds { .. } => "STATE_INSUFFICIENT_FUNDS",
            NotMinter { .. } => "STATE_NOT_MINTER",
            SupplyOverflow { .. } => "STATE_SUPPLY_OVERFLOW",
            BalanceOverflow { .. } => "STATE_BALANCE_OVERFLOW",
            Deserialize { .. } => "STATE_DESERIALIZE",
            Serialize { .. } => "STATE_SERIALIZE",
            MissingRecord { .. } => "STATE_MISSING_RECORD",
        }
    }
}
