use account_core::AccountId;
use thiserror::Error;
use uuid::Uuid;

/// Verification workflow errors
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// Request id unknown
    #[error("Verification request not found: {0}")]
    NotFound(Uuid),

    /// The account already has an undecided request
    #[error("Account {0} already has a pending verification request")]
    AlreadyPending(AccountId),

    /// A documented party is under 18; hard gate, checked before queuing
    #[error("Underage party: computed age {age} is below 18")]
    Underage {
        /// The computed age that failed the gate
        age: i32,
    },

    /// Malformed or incomplete identity payload
    #[error("Invalid identity payload: {0}")]
    InvalidPayload(String),

    /// Operation illegal in the request's current state
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// Account store error
    #[error(transparent)]
    Account(#[from] account_core::Error),
}

/// Result type for verification operations
pub type Result<T> = std::result::Result<T, Error>;
