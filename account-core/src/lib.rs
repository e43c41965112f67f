//! Velvet Account Core
//!
//! Durable record of each account: profile, lifecycle status, verification
//! tier, trust score, strikes, and moderation history.
//!
//! # Invariants
//!
//! - Verification tiers are strictly ordered and defined in exactly one place
//! - Trust score is recomputed on every mutation of a contributing input
//! - Strikes only ever increase
//! - Accounts referenced by open reports or verification requests cannot be
//!   hard-deleted; deactivation is the soft default

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod store;
pub mod types;

// Re-exports
pub use error::{Error, Result};
pub use store::AccountStore;
pub use types::{
    AccessLevel, Account, AccountId, AccountStatus, LegacyLevel, ProfileKind, SubscriptionTier,
    VerificationTier,
};
