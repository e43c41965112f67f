use account_core::AccountId;
use std::fmt;
use thiserror::Error;

/// Why a code was rejected at redemption
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidCodeReason {
    /// No such code (deliberately indistinguishable from a revoked one)
    Unknown,
    /// The code was already redeemed
    AlreadyUsed,
    /// The code passed its expiry timestamp
    Expired,
    /// Requested profile kind does not match the code's scope
    KindMismatch,
}

impl fmt::Display for InvalidCodeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InvalidCodeReason::Unknown => "unknown code",
            InvalidCodeReason::AlreadyUsed => "already used",
            InvalidCodeReason::Expired => "expired",
            InvalidCodeReason::KindMismatch => "profile kind mismatch",
        };
        write!(f, "{}", s)
    }
}

/// Invitation ledger errors
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// Code is unusable for registration
    #[error("Invalid invitation: {reason}")]
    InvalidInvitation {
        /// Structured rejection reason
        reason: InvalidCodeReason,
    },

    /// Issuer reached its lifetime mint cap
    #[error("Quota exceeded: issuer {issuer} reached its lifetime cap of {cap}")]
    QuotaExceeded {
        /// The issuing account
        issuer: AccountId,
        /// The kind-specific cap that was hit
        cap: u32,
    },

    /// Account store error (unknown issuer, etc.)
    #[error(transparent)]
    Account(#[from] account_core::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, Error>;
