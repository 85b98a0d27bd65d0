//! Application-wide error types.

use thiserror::Error;

use crate::types::{Amount, EntityKey};

/// Failures of a ledger operation. Every variant leaves state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Caller is not an administrator")]
    Unauthorized,

    #[error("Key already exists: {0}")]
    DuplicateKey(EntityKey),

    #[error("Not found: {0}")]
    NotFound(EntityKey),

    #[error("Not active: {0}")]
    NotActive(EntityKey),

    #[error("All milestones already released: {0}")]
    MilestonesExhausted(EntityKey),

    #[error("No receiver assigned: {0}")]
    NotAssigned(EntityKey),

    #[error("Insufficient pool balance: required {required}, available {available}")]
    InsufficientBalance { required: Amount, available: Amount },

    #[error("Expected {expected} winners, got {actual}")]
    WinnersLengthInvalid { expected: usize, actual: usize },

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Amount must be positive")]
    InvalidAmount,

    #[error("Account must not be blank")]
    InvalidAccount,

    #[error("Amount overflow")]
    Overflow,
}

impl LedgerError {
    /// Stable machine-readable code, used in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::DuplicateKey(_) => "DUPLICATE_KEY",
            Self::NotFound(_) => "NOT_FOUND",
            Self::NotActive(_) => "NOT_ACTIVE",
            Self::MilestonesExhausted(_) => "MILESTONES_EXHAUSTED",
            Self::NotAssigned(_) => "NOT_ASSIGNED",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::WinnersLengthInvalid { .. } => "WINNERS_LENGTH_INVALID",
            Self::InvalidSchedule(_) => "INVALID_SCHEDULE",
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::InvalidAccount => "INVALID_ACCOUNT",
            Self::Overflow => "OVERFLOW",
        }
    }
}

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

/// Startup failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ServiceError>;
