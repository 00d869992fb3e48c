//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (`StateError`, `SynthesisError`, `ActionError`, ...)
//! are defined next to the code that raises them. This module provides the
//! shared classification every one of them implements.
//!
//! # Design Principles
//!
//! - **Type Safety**: each layer has its own error enum with specific variants
//! - **Taxonomy**: every error maps onto exactly one [`ErrorKind`]
//! - **Severity Classification**: errors are categorized for recovery strategies
//! - **Deterministic**: error values never depend on host state

use serde::{Deserialize, Serialize};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: conditions that may succeed once the ledger changes
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistencies that require investigation
/// - **Fatal**: unrecoverable errors indicating corrupted state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorSeverity {
    /// Recoverable error - resubmitting later or with more funds may succeed.
    ///
    /// Examples: insufficient balance, item still locked
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: malformed payload, wrong material subtype
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: weighted walk exhausted, undecodable stored record
    /// These indicate bugs or broken table data and should be investigated.
    Internal,

    /// Fatal error - state corrupted, cannot continue.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Rejection taxonomy shared by every action.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
pub enum ErrorKind {
    /// A required static table row is absent.
    ConfigurationMissing,
    /// Quantity or ratio mismatch.
    InsufficientMaterial,
    /// Wrong item type, wrong subtype, or a mixed-subtype batch.
    InvalidMaterial,
    /// Block-index gate not satisfied.
    NotYetUnlocked,
    /// Address already claimed.
    DuplicateRegistration,
    /// Balance too low for a transfer or fee.
    InsufficientFunds,
    /// Decode-time structural failure.
    MalformedPayload,
    /// An invariant the core relies on was violated.
    InternalInconsistency,
    /// Gas limit below the action's cost.
    CostExhausted,
    /// Signer does not own the record or lacks the authority.
    Unauthorized,
    /// Referenced record is absent or in the wrong state.
    InvalidTarget,
}

impl ErrorKind {
    pub const fn severity(self) -> ErrorSeverity {
        match self {
            Self::InsufficientFunds | Self::NotYetUnlocked | Self::CostExhausted => {
                ErrorSeverity::Recoverable
            }
            Self::ConfigurationMissing
            | Self::InsufficientMaterial
            | Self::InvalidMaterial
            | Self::DuplicateRegistration
            | Self::MalformedPayload
            | Self::Unauthorized
            | Self::InvalidTarget => ErrorSeverity::Validation,
            Self::InternalInconsistency => ErrorSeverity::Internal,
        }
    }

    /// Expected, signer-attributable rejection (everything except internal bugs).
    pub const fn is_user_attributable(self) -> bool {
        !matches!(self, Self::InternalInconsistency)
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Map every variant onto one [`ErrorKind`]
/// - Return a stable, upper-snake-case code from `error_code`
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the taxonomy kind of this error.
    fn kind(&self) -> ErrorKind;

    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity {
        self.kind().severity()
    }

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str;
}
