//! Registration flow
//!
//! The single entry point for creating member accounts: consume an
//! invitation code, then create the account at the unverified tier. A
//! failed redemption creates nothing.

use crate::error::Result;
use crate::ledger::InvitationLedger;
use account_core::{Account, AccountId, AccountStore, ProfileKind};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

/// Registrar couples the invitation ledger with the account store
pub struct Registrar {
    ledger: Arc<InvitationLedger>,
    accounts: Arc<AccountStore>,
}

impl Registrar {
    /// Create a registrar over the given ledger and store
    pub fn new(ledger: Arc<InvitationLedger>, accounts: Arc<AccountStore>) -> Self {
        Self { ledger, accounts }
    }

    /// Register a new account through an invitation code
    ///
    /// The account id is allocated first so the redemption can record its
    /// redeemer; the redemption is the only fallible step, so an invalid
    /// code leaves no partial state behind.
    pub fn register(
        &self,
        code: &str,
        kind: ProfileKind,
        display_name: &str,
    ) -> Result<Account> {
        let id = AccountId::generate();
        let redemption = self.ledger.redeem(code, kind, &id)?;

        let account = self
            .accounts
            .create(id, display_name, redemption.kind, Utc::now());
        info!(
            "Registered {} ({}) via code {}",
            account.id, account.profile_kind, redemption.code
        );
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QuotaConfig;
    use crate::error::{Error, InvalidCodeReason};
    use account_core::AccountStatus;
    use chrono::Duration;

    fn setup() -> (Arc<AccountStore>, Arc<InvitationLedger>, Registrar) {
        let accounts = Arc::new(AccountStore::default());
        let ledger = Arc::new(InvitationLedger::new(
            accounts.clone(),
            QuotaConfig::default(),
        ));
        let registrar = Registrar::new(ledger.clone(), accounts.clone());
        (accounts, ledger, registrar)
    }

    #[test]
    fn test_register_creates_pending_account() {
        let (accounts, ledger, registrar) = setup();
        let code = ledger.mint_system(ProfileKind::Couple, Utc::now() + Duration::days(30));

        let account = registrar
            .register(&code.code, ProfileKind::Couple, "nova&io")
            .unwrap();

        assert_eq!(account.status, AccountStatus::Pending);
        assert_eq!(account.profile_kind, ProfileKind::Couple);
        assert_eq!(accounts.get(&account.id).unwrap().trust_score, 10);
        assert_eq!(ledger.get(&code.code).unwrap().redeemed_by, Some(account.id));
    }

    #[test]
    fn test_register_with_bad_code_creates_nothing() {
        let (accounts, _ledger, registrar) = setup();

        let err = registrar
            .register("K-IND-NOPE", ProfileKind::Individual, "ghost")
            .unwrap_err();

        assert!(matches!(
            err,
            Error::InvalidInvitation {
                reason: InvalidCodeReason::Unknown
            }
        ));
        assert!(accounts.is_empty());
    }

    #[test]
    fn test_register_kind_must_match_code() {
        let (accounts, ledger, registrar) = setup();
        let code = ledger.mint_system(ProfileKind::Establishment, Utc::now() + Duration::days(30));

        let err = registrar
            .register(&code.code, ProfileKind::Individual, "walk-in")
            .unwrap_err();

        assert!(matches!(
            err,
            Error::InvalidInvitation {
                reason: InvalidCodeReason::KindMismatch
            }
        ));
        assert!(accounts.is_empty());
    }
}
