use thiserror::Error;
use uuid::Uuid;

/// Moderation errors
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// Report id unknown
    #[error("Report not found: {0}")]
    NotFound(Uuid),

    /// Malformed report (e.g. self-report)
    #[error("Invalid report: {0}")]
    InvalidReport(String),

    /// Operation illegal in the report's current state
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// Account store error
    #[error(transparent)]
    Account(#[from] account_core::Error),
}

/// Result type for moderation operations
pub type Result<T> = std::result::Result<T, Error>;
