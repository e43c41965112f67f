//! Velvet Invitation Ledger
//!
//! Issues, tracks, and redeems the single-use invitation codes that gate
//! registration. Codes are scoped to a profile kind, expire lazily, and are
//! quota-limited per issuer.

pub mod config;
pub mod error;
pub mod ledger;
pub mod registration;
pub mod types;

pub use config::QuotaConfig;
pub use error::{Error, InvalidCodeReason, Result};
pub use ledger::InvitationLedger;
pub use registration::Registrar;
pub use types::{InvitationCode, Issuer, Redemption};
