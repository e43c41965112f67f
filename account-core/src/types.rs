//! Core types for accounts
//!
//! All types are serde-serializable; the verification tier ordering and its
//! legacy coarse label live here and nowhere else.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use trust_engine::ScoreInputs;
use uuid::Uuid;

/// Opaque account identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Create new account ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh random account ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Profile kind an account is created as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileKind {
    /// Single-person profile
    Individual,
    /// Two-person profile
    Couple,
    /// Club, hotel, or other venue
    Establishment,
}

impl ProfileKind {
    /// Human-readable name
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileKind::Individual => "Individual",
            ProfileKind::Couple => "Couple",
            ProfileKind::Establishment => "Establishment",
        }
    }

    /// Short prefix used in invitation code strings
    pub fn code_prefix(&self) -> &'static str {
        match self {
            ProfileKind::Individual => "IND",
            ProfileKind::Couple => "CPL",
            ProfileKind::Establishment => "BIZ",
        }
    }

    /// Number of identity parties this profile kind must document
    pub fn party_count(&self) -> usize {
        match self {
            ProfileKind::Couple => 2,
            ProfileKind::Individual | ProfileKind::Establishment => 1,
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Individual" => Some(ProfileKind::Individual),
            "Couple" => Some(ProfileKind::Couple),
            "Establishment" => Some(ProfileKind::Establishment),
            _ => None,
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Account lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountStatus {
    /// Full member
    Active,
    /// Awaiting review; limited access only
    Pending,
    /// Locked out entirely
    Suspended,
}

/// What an account is allowed to do, derived from its status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessLevel {
    /// Full feature access
    Full,
    /// Can authenticate but not use full features
    Limited,
    /// Cannot authenticate at all
    Locked,
}

impl From<AccountStatus> for AccessLevel {
    fn from(status: AccountStatus) -> Self {
        match status {
            AccountStatus::Active => AccessLevel::Full,
            AccountStatus::Pending => AccessLevel::Limited,
            AccountStatus::Suspended => AccessLevel::Locked,
        }
    }
}

/// Verification tier, strictly ordered
///
/// Transitions only move forward in the normal flow; a rejection leaves the
/// tier unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum VerificationTier {
    /// L0: no verification evidence
    Unverified = 0,
    /// L1: email/phone confirmed
    Contact = 1,
    /// L2: ID document and selfie reviewed
    Identity = 2,
    /// L3: passed a human review session
    HumanReview = 3,
    /// L4: premium live-video verification
    VideoPremium = 4,
}

impl VerificationTier {
    /// Tier ordinal (0-4)
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Display label
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationTier::Unverified => "L0: Unverified",
            VerificationTier::Contact => "L1: Contact",
            VerificationTier::Identity => "L2: Identity",
            VerificationTier::HumanReview => "L3: Human Review",
            VerificationTier::VideoPremium => "L4: Video Premium",
        }
    }

    /// Coarse legacy label, for display compatibility only
    ///
    /// This is the single mapping site: L0/L1 are Basic, L2 is Verified,
    /// L3/L4 are High-Trust.
    pub fn legacy_level(&self) -> LegacyLevel {
        match self {
            VerificationTier::Unverified | VerificationTier::Contact => LegacyLevel::Basic,
            VerificationTier::Identity => LegacyLevel::Verified,
            VerificationTier::HumanReview | VerificationTier::VideoPremium => {
                LegacyLevel::HighTrust
            }
        }
    }
}

impl fmt::Display for VerificationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse verification label kept for older clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegacyLevel {
    /// Little or no verification
    Basic,
    /// Identity verified
    Verified,
    /// Human-reviewed or better
    HighTrust,
}

impl LegacyLevel {
    /// Display label
    pub fn as_str(&self) -> &'static str {
        match self {
            LegacyLevel::Basic => "Basic",
            LegacyLevel::Verified => "Verified",
            LegacyLevel::HighTrust => "High-Trust",
        }
    }
}

/// Subscription tier
///
/// The old `is_premium` flag is computed from this; it is not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubscriptionTier {
    /// No paid subscription
    Free,
    /// Consumer supporter plan
    Supporter,
    /// Business tier 1
    BizBasic,
    /// Business tier 2
    BizProfessional,
    /// Business tier 3
    BizElite,
    /// Business tier 4, custom contract
    BizEnterprise,
}

impl SubscriptionTier {
    /// Any paying plan counts as premium
    pub fn is_premium(&self) -> bool {
        !matches!(self, SubscriptionTier::Free)
    }

    /// Business plans
    pub fn is_business(&self) -> bool {
        matches!(
            self,
            SubscriptionTier::BizBasic
                | SubscriptionTier::BizProfessional
                | SubscriptionTier::BizElite
                | SubscriptionTier::BizEnterprise
        )
    }
}

/// Account record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Opaque id
    pub id: AccountId,

    /// Public display name
    pub display_name: String,

    /// Profile kind, fixed at creation
    pub profile_kind: ProfileKind,

    /// Lifecycle status
    pub status: AccountStatus,

    /// Verification tier
    pub tier: VerificationTier,

    /// Subscription tier
    pub subscription: SubscriptionTier,

    /// Visibility restriction applied by moderators
    pub shadow_banned: bool,

    /// Derived trust score (0-100)
    pub trust_score: u8,

    /// Moderation warnings received; never decreases
    pub strikes: u32,

    /// Reports resolved against this account with an enacted action
    pub reports_received: u32,

    /// Open verification requests and reports naming this account
    pub open_holds: u32,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Whether the account has a paying subscription
    pub fn is_premium(&self) -> bool {
        self.subscription.is_premium()
    }

    /// Whole days since the account was created
    pub fn account_age_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_days()
    }

    /// Access level derived from status
    pub fn access_level(&self) -> AccessLevel {
        AccessLevel::from(self.status)
    }

    /// Coarse verification label for older clients
    pub fn legacy_level(&self) -> LegacyLevel {
        self.tier.legacy_level()
    }

    /// Inputs to the trust score function, as of `now`
    pub fn score_inputs(&self, now: DateTime<Utc>) -> ScoreInputs {
        ScoreInputs {
            tier_rank: self.tier.rank(),
            account_age_days: self.account_age_days(now),
            premium: self.is_premium(),
            reports_received: self.reports_received,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(VerificationTier::Unverified < VerificationTier::Contact);
        assert!(VerificationTier::Identity < VerificationTier::HumanReview);
        assert!(VerificationTier::HumanReview < VerificationTier::VideoPremium);
        assert_eq!(VerificationTier::Identity.rank(), 2);
    }

    #[test]
    fn test_legacy_level_mapping() {
        assert_eq!(
            VerificationTier::Unverified.legacy_level(),
            LegacyLevel::Basic
        );
        assert_eq!(VerificationTier::Contact.legacy_level(), LegacyLevel::Basic);
        assert_eq!(
            VerificationTier::Identity.legacy_level(),
            LegacyLevel::Verified
        );
        assert_eq!(
            VerificationTier::HumanReview.legacy_level(),
            LegacyLevel::HighTrust
        );
        assert_eq!(
            VerificationTier::VideoPremium.legacy_level(),
            LegacyLevel::HighTrust
        );
    }

    #[test]
    fn test_premium_is_computed_from_subscription() {
        assert!(!SubscriptionTier::Free.is_premium());
        assert!(SubscriptionTier::Supporter.is_premium());
        assert!(SubscriptionTier::BizElite.is_premium());
        assert!(SubscriptionTier::BizElite.is_business());
        assert!(!SubscriptionTier::Supporter.is_business());
    }

    #[test]
    fn test_access_level_from_status() {
        assert_eq!(AccessLevel::from(AccountStatus::Active), AccessLevel::Full);
        assert_eq!(
            AccessLevel::from(AccountStatus::Pending),
            AccessLevel::Limited
        );
        assert_eq!(
            AccessLevel::from(AccountStatus::Suspended),
            AccessLevel::Locked
        );
    }

    #[test]
    fn test_party_count_per_kind() {
        assert_eq!(ProfileKind::Individual.party_count(), 1);
        assert_eq!(ProfileKind::Couple.party_count(), 2);
        assert_eq!(ProfileKind::Establishment.party_count(), 1);
    }

    #[test]
    fn test_profile_kind_round_trips_through_str() {
        for kind in [
            ProfileKind::Individual,
            ProfileKind::Couple,
            ProfileKind::Establishment,
        ] {
            assert_eq!(ProfileKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(ProfileKind::from_str("Squad"), None);
    }
}
