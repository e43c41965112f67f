use account_core::{AccountId, ProfileKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who minted an invitation code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Issuer {
    /// Platform operators; not subject to any quota
    System,
    /// A member account, subject to its kind-specific lifetime cap
    Account(AccountId),
}

/// Single-use, kind-scoped, expiring registration token
///
/// Codes are never deleted. An expired-but-unused code stays visible in
/// listings; expiry is only evaluated at redemption time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvitationCode {
    /// Unique code string, e.g. `K-IND-7F3K2Q`
    pub code: String,

    /// Profile kind the created account must have
    pub kind: ProfileKind,

    /// Minting party
    pub issued_by: Issuer,

    /// Mint timestamp
    pub created_at: DateTime<Utc>,

    /// Expiry timestamp (checked lazily at redemption)
    pub expires_at: DateTime<Utc>,

    /// Set exactly once, by redemption
    pub used: bool,

    /// Account created through this code, if any
    pub redeemed_by: Option<AccountId>,
}

impl InvitationCode {
    /// Whether the code has passed its expiry
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Receipt for a successful redemption
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Redemption {
    /// The redeemed code string
    pub code: String,
    /// Profile kind the code was scoped to
    pub kind: ProfileKind,
    /// Account the code was consumed for
    pub redeemed_by: AccountId,
    /// Redemption timestamp
    pub redeemed_at: DateTime<Utc>,
}
