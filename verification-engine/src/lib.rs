//! Velvet Verification Engine
//!
//! Manages the identity verification workflow: one outstanding request per
//! account, a server-side age gate, operator decisions that advance the
//! account's verification tier, and an optional external risk oracle whose
//! output is stored opaquely and never interpreted by the engine.

pub mod error;
pub mod identity;
pub mod oracle;
pub mod types;
pub mod workflow;

pub use error::{Error, Result};
pub use oracle::{HttpRiskOracle, OracleError, RiskOracle, SimulatedOracle};
pub use types::{
    Decision, IdentityParty, IdentityPayload, RedactedIdentity, RequestStatus, RiskReport,
    VerificationRequest,
};
pub use workflow::VerificationWorkflow;
