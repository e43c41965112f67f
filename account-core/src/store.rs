//! Concurrent account store
//!
//! All mutations are single-record, last-writer-wins, performed under the
//! map's exclusive entry reference. Mutations that change a trust-score
//! input recompute the score in the same critical section, so a stale score
//! is never observable.

use crate::error::{Error, Result};
use crate::types::{
    AccessLevel, Account, AccountId, AccountStatus, ProfileKind, SubscriptionTier,
    VerificationTier,
};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::{debug, info, warn};
use trust_engine::TrustScorer;

/// AccountStore holds every account record, keyed by id
pub struct AccountStore {
    accounts: DashMap<AccountId, Account>,
    scorer: TrustScorer,
}

impl AccountStore {
    /// Create an empty store with the given scorer
    pub fn new(scorer: TrustScorer) -> Self {
        Self {
            accounts: DashMap::new(),
            scorer,
        }
    }

    /// The scorer used for write-through recomputation
    pub fn scorer(&self) -> &TrustScorer {
        &self.scorer
    }

    /// Number of accounts in the store
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Fetch an account by id
    pub fn get(&self, id: &AccountId) -> Result<Account> {
        self.accounts
            .get(id)
            .map(|a| a.clone())
            .ok_or_else(|| Error::NotFound(id.clone()))
    }

    /// Create a new account entering via invitation redemption
    ///
    /// Accounts start Pending at the unverified tier; full access is granted
    /// once the profile passes review. The caller (registration flow) is
    /// responsible for having redeemed a valid invitation first.
    pub fn create(
        &self,
        id: AccountId,
        display_name: impl Into<String>,
        profile_kind: ProfileKind,
        now: DateTime<Utc>,
    ) -> Account {
        self.insert_new(id, display_name.into(), profile_kind, AccountStatus::Pending, now)
    }

    /// Create an administratively seeded account (no invitation, Active)
    pub fn create_seeded(
        &self,
        id: AccountId,
        display_name: impl Into<String>,
        profile_kind: ProfileKind,
        now: DateTime<Utc>,
    ) -> Account {
        self.insert_new(id, display_name.into(), profile_kind, AccountStatus::Active, now)
    }

    fn insert_new(
        &self,
        id: AccountId,
        display_name: String,
        profile_kind: ProfileKind,
        status: AccountStatus,
        now: DateTime<Utc>,
    ) -> Account {
        let mut account = Account {
            id: id.clone(),
            display_name,
            profile_kind,
            status,
            tier: VerificationTier::Unverified,
            subscription: SubscriptionTier::Free,
            shadow_banned: false,
            trust_score: 0,
            strikes: 0,
            reports_received: 0,
            open_holds: 0,
            created_at: now,
        };
        account.trust_score = self.scorer.score(&account.score_inputs(now)).value();

        info!(
            "Account {} created ({}, {:?})",
            account.id, account.profile_kind, account.status
        );
        self.accounts.insert(id, account.clone());
        account
    }

    /// Access level for an account, from its lifecycle status
    pub fn check_access(&self, id: &AccountId) -> Result<AccessLevel> {
        Ok(self.get(id)?.access_level())
    }

    /// Set the verification tier and recompute the trust score
    pub fn update_tier(&self, id: &AccountId, tier: VerificationTier) -> Result<u8> {
        let now = Utc::now();
        self.with_mut(id, |account, scorer| {
            account.tier = tier;
            account.trust_score = scorer.score(&account.score_inputs(now)).value();
            debug!(
                "Account {} tier -> {}, score {}",
                account.id, tier, account.trust_score
            );
            account.trust_score
        })
    }

    /// Set the lifecycle status
    ///
    /// Suspending an already-suspended account is a no-op, not an error.
    pub fn update_status(&self, id: &AccountId, status: AccountStatus) -> Result<()> {
        self.with_mut(id, |account, _| {
            if account.status == status {
                return;
            }
            if status == AccountStatus::Suspended {
                warn!("Account {} suspended", account.id);
            }
            account.status = status;
        })
    }

    /// Record a moderation strike; returns the new strike count
    ///
    /// Strikes are historical facts: there is no un-strike.
    pub fn add_strike(&self, id: &AccountId) -> Result<u32> {
        self.with_mut(id, |account, _| {
            account.strikes += 1;
            warn!("Account {} strike #{}", account.id, account.strikes);
            account.strikes
        })
    }

    /// Overwrite the stored trust score
    pub fn set_trust_score(&self, id: &AccountId, score: u8) -> Result<()> {
        self.with_mut(id, |account, _| {
            account.trust_score = score.min(100);
        })
    }

    /// Change the subscription tier and recompute the trust score
    pub fn set_subscription(&self, id: &AccountId, tier: SubscriptionTier) -> Result<u8> {
        let now = Utc::now();
        self.with_mut(id, |account, scorer| {
            account.subscription = tier;
            account.trust_score = scorer.score(&account.score_inputs(now)).value();
            account.trust_score
        })
    }

    /// Apply or lift a shadow ban
    pub fn set_shadow_ban(&self, id: &AccountId, shadow_banned: bool) -> Result<()> {
        self.with_mut(id, |account, _| {
            account.shadow_banned = shadow_banned;
        })
    }

    /// Count a report resolved against this account and recompute the score
    pub fn record_report_resolved(&self, id: &AccountId) -> Result<u8> {
        let now = Utc::now();
        self.with_mut(id, |account, scorer| {
            account.reports_received += 1;
            account.trust_score = scorer.score(&account.score_inputs(now)).value();
            debug!(
                "Account {} reports_received {} score {}",
                account.id, account.reports_received, account.trust_score
            );
            account.trust_score
        })
    }

    /// Recompute the trust score from current state as of `now`
    ///
    /// Idempotent: with no intervening change the stored score is unchanged.
    pub fn refresh_score(&self, id: &AccountId, now: DateTime<Utc>) -> Result<u8> {
        self.with_mut(id, |account, scorer| {
            account.trust_score = scorer.score(&account.score_inputs(now)).value();
            account.trust_score
        })
    }

    /// Mark the account as referenced by an open request or report
    pub fn hold(&self, id: &AccountId) -> Result<()> {
        self.with_mut(id, |account, _| {
            account.open_holds += 1;
        })
    }

    /// Release one outstanding reference
    pub fn release(&self, id: &AccountId) -> Result<()> {
        self.with_mut(id, |account, _| {
            account.open_holds = account.open_holds.saturating_sub(1);
        })
    }

    /// Soft removal: lock the account out but keep the record
    pub fn deactivate(&self, id: &AccountId) -> Result<()> {
        self.update_status(id, AccountStatus::Suspended)
    }

    /// Operator hard delete
    ///
    /// Refused while any verification request or report still references the
    /// account; deactivation is the safe default.
    pub fn remove(&self, id: &AccountId) -> Result<Account> {
        // The hold check and the removal share the entry lock.
        if let Some((_, account)) = self.accounts.remove_if(id, |_, a| a.open_holds == 0) {
            warn!("Account {} hard-deleted", account.id);
            return Ok(account);
        }
        match self.accounts.get(id) {
            Some(entry) => Err(Error::InvalidTransition {
                account: id.clone(),
                detail: format!(
                    "{} open reference(s); deactivate instead",
                    entry.open_holds
                ),
            }),
            None => Err(Error::NotFound(id.clone())),
        }
    }

    fn with_mut<T>(
        &self,
        id: &AccountId,
        f: impl FnOnce(&mut Account, &TrustScorer) -> T,
    ) -> Result<T> {
        match self.accounts.get_mut(id) {
            Some(mut account) => Ok(f(&mut account, &self.scorer)),
            None => Err(Error::NotFound(id.clone())),
        }
    }
}

impl Default for AccountStore {
    fn default() -> Self {
        Self::new(TrustScorer::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_account() -> (AccountStore, AccountId) {
        let store = AccountStore::default();
        let account = store.create(
            AccountId::generate(),
            "luna",
            ProfileKind::Individual,
            Utc::now(),
        );
        (store, account.id)
    }

    #[test]
    fn test_new_account_starts_pending_at_base_score() {
        let (store, id) = store_with_account();
        let account = store.get(&id).unwrap();

        assert_eq!(account.status, AccountStatus::Pending);
        assert_eq!(account.tier, VerificationTier::Unverified);
        assert_eq!(account.trust_score, 10);
        assert_eq!(account.strikes, 0);
    }

    #[test]
    fn test_get_unknown_account_is_not_found() {
        let store = AccountStore::default();
        let missing = AccountId::new("missing");
        assert!(matches!(store.get(&missing), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_update_tier_recomputes_score() {
        let (store, id) = store_with_account();
        let score = store.update_tier(&id, VerificationTier::Identity).unwrap();

        // 10 base + 10 contact + 25 identity
        assert_eq!(score, 45);
        assert_eq!(store.get(&id).unwrap().trust_score, 45);
    }

    #[test]
    fn test_suspend_is_idempotent() {
        let (store, id) = store_with_account();
        store.update_status(&id, AccountStatus::Suspended).unwrap();
        store.update_status(&id, AccountStatus::Suspended).unwrap();

        assert_eq!(store.get(&id).unwrap().status, AccountStatus::Suspended);
        assert_eq!(store.check_access(&id).unwrap(), AccessLevel::Locked);
    }

    #[test]
    fn test_strikes_only_increase() {
        let (store, id) = store_with_account();
        assert_eq!(store.add_strike(&id).unwrap(), 1);
        assert_eq!(store.add_strike(&id).unwrap(), 2);
        assert_eq!(store.get(&id).unwrap().strikes, 2);
    }

    #[test]
    fn test_resolved_report_lowers_score() {
        let (store, id) = store_with_account();
        store.update_tier(&id, VerificationTier::VideoPremium).unwrap();
        let before = store.get(&id).unwrap().trust_score;

        let after = store.record_report_resolved(&id).unwrap();
        assert_eq!(after, before - 20);
    }

    #[test]
    fn test_refresh_score_is_idempotent() {
        let (store, id) = store_with_account();
        let now = Utc::now();
        let first = store.refresh_score(&id, now).unwrap();
        let second = store.refresh_score(&id, now).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_remove_refused_while_referenced() {
        let (store, id) = store_with_account();
        store.hold(&id).unwrap();

        assert!(matches!(
            store.remove(&id),
            Err(Error::InvalidTransition { .. })
        ));

        store.release(&id).unwrap();
        store.remove(&id).unwrap();
        assert!(store.get(&id).is_err());
    }

    #[test]
    fn test_shadow_ban_is_carried_state_only() {
        let (store, id) = store_with_account();
        let before = store.get(&id).unwrap();

        store.set_shadow_ban(&id, true).unwrap();
        let after = store.get(&id).unwrap();
        assert!(after.shadow_banned);
        // Visibility restriction, nothing else: score and access unchanged.
        assert_eq!(after.trust_score, before.trust_score);
        assert_eq!(after.status, before.status);
    }

    #[test]
    fn test_deactivate_is_the_soft_default() {
        let (store, id) = store_with_account();
        store.hold(&id).unwrap();

        // Hard delete refused, soft removal always available.
        assert!(store.remove(&id).is_err());
        store.deactivate(&id).unwrap();
        assert_eq!(store.get(&id).unwrap().status, AccountStatus::Suspended);
    }

    #[test]
    fn test_set_trust_score_clamps() {
        let (store, id) = store_with_account();
        store.set_trust_score(&id, 250).unwrap();
        assert_eq!(store.get(&id).unwrap().trust_score, 100);
    }

    #[test]
    fn test_subscription_change_recomputes_score() {
        let (store, id) = store_with_account();
        let score = store
            .set_subscription(&id, SubscriptionTier::Supporter)
            .unwrap();
        assert_eq!(score, 20); // 10 base + 10 premium
        assert!(store.get(&id).unwrap().is_premium());
    }
}
