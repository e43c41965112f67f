//! Error types for the account store

use crate::types::AccountId;
use thiserror::Error;

/// Result type for account operations
pub type Result<T> = std::result::Result<T, Error>;

/// Account store errors
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// Account id unknown
    #[error("Account not found: {0}")]
    NotFound(AccountId),

    /// Illegal lifecycle operation (e.g. hard delete while referenced)
    #[error("Invalid transition for {account}: {detail}")]
    InvalidTransition {
        /// Account the operation targeted
        account: AccountId,
        /// What made the operation illegal
        detail: String,
    },
}
