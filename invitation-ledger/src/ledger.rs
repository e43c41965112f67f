//! The invitation ledger
//!
//! Two invariants are enforced here and must hold under concurrency:
//! redemption succeeds at most once per code (check-then-set under the
//! code's exclusive entry reference), and an issuer's lifetime mint count
//! never exceeds its kind-specific cap (count-then-insert under the
//! issuer's entry reference).

use crate::config::QuotaConfig;
use crate::error::{Error, InvalidCodeReason, Result};
use crate::types::{InvitationCode, Issuer, Redemption};
use account_core::{AccountId, AccountStore, ProfileKind};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::sync::Arc;
use tracing::{info, warn};

/// InvitationLedger mints, lists, and redeems invitation codes
pub struct InvitationLedger {
    codes: DashMap<String, InvitationCode>,
    // Insertion-ordered code strings per issuer; doubles as the lifetime
    // mint counter for quota checks.
    issuer_index: DashMap<AccountId, Vec<String>>,
    accounts: Arc<AccountStore>,
    quotas: QuotaConfig,
}

impl InvitationLedger {
    /// Create an empty ledger
    pub fn new(accounts: Arc<AccountStore>, quotas: QuotaConfig) -> Self {
        Self {
            codes: DashMap::new(),
            issuer_index: DashMap::new(),
            accounts,
            quotas,
        }
    }

    /// Total number of codes ever minted
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the ledger holds no codes
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Fetch a code by string
    pub fn get(&self, code: &str) -> Option<InvitationCode> {
        self.codes.get(code).map(|c| c.clone())
    }

    /// Mint a system code; no quota applies
    pub fn mint_system(&self, kind: ProfileKind, expires_at: DateTime<Utc>) -> InvitationCode {
        let code = self.insert_unique(kind, Issuer::System, expires_at);
        info!("System code {} minted for {}", code.code, kind);
        code
    }

    /// Mint a code on behalf of a member issuer
    ///
    /// The lifetime count (used and unused codes alike) is capped per the
    /// issuer's profile kind.
    pub fn mint_for_issuer(
        &self,
        issuer: &AccountId,
        kind: ProfileKind,
        expires_at: DateTime<Utc>,
    ) -> Result<InvitationCode> {
        let issuer_account = self.accounts.get(issuer)?;
        let cap = self.quotas.cap_for(issuer_account.profile_kind);

        // The count check and the index append share the issuer's entry
        // lock, so concurrent mints cannot both squeeze under the cap.
        let mut owned = self.issuer_index.entry(issuer.clone()).or_default();
        if owned.len() as u32 >= cap {
            warn!("Issuer {} hit invitation cap {}", issuer, cap);
            return Err(Error::QuotaExceeded {
                issuer: issuer.clone(),
                cap,
            });
        }

        let code = self.insert_unique(kind, Issuer::Account(issuer.clone()), expires_at);
        owned.push(code.code.clone());
        info!(
            "Issuer {} minted code {} ({}/{})",
            issuer,
            code.code,
            owned.len(),
            cap
        );
        Ok(code)
    }

    /// Redeem a code for a new account
    ///
    /// The unused/unexpired/kind checks and the used-flag flip happen under
    /// the code's exclusive entry reference: of N concurrent attempts on one
    /// code, exactly one succeeds.
    pub fn redeem(
        &self,
        code: &str,
        requested_kind: ProfileKind,
        redeemer: &AccountId,
    ) -> Result<Redemption> {
        let now = Utc::now();

        let mut entry = self.codes.get_mut(code).ok_or(Error::InvalidInvitation {
            reason: InvalidCodeReason::Unknown,
        })?;

        if entry.used {
            return Err(Error::InvalidInvitation {
                reason: InvalidCodeReason::AlreadyUsed,
            });
        }
        if entry.is_expired(now) {
            return Err(Error::InvalidInvitation {
                reason: InvalidCodeReason::Expired,
            });
        }
        if entry.kind != requested_kind {
            return Err(Error::InvalidInvitation {
                reason: InvalidCodeReason::KindMismatch,
            });
        }

        entry.used = true;
        entry.redeemed_by = Some(redeemer.clone());
        info!("Code {} redeemed by {}", entry.code, redeemer);

        Ok(Redemption {
            code: entry.code.clone(),
            kind: entry.kind,
            redeemed_by: redeemer.clone(),
            redeemed_at: now,
        })
    }

    /// Codes minted by an issuer, in insertion order
    ///
    /// Display only; expired and used codes remain listed.
    pub fn list_for_issuer(&self, issuer: &AccountId) -> Vec<InvitationCode> {
        let owned: Vec<String> = self
            .issuer_index
            .get(issuer)
            .map(|v| v.clone())
            .unwrap_or_default();

        owned
            .iter()
            .filter_map(|c| self.codes.get(c).map(|r| r.clone()))
            .collect()
    }

    /// Insert a freshly generated code, regenerating on the rare collision
    fn insert_unique(
        &self,
        kind: ProfileKind,
        issued_by: Issuer,
        expires_at: DateTime<Utc>,
    ) -> InvitationCode {
        loop {
            let code_str = generate_code_string(kind);
            let entry = self.codes.entry(code_str.clone());
            if let dashmap::mapref::entry::Entry::Vacant(vacant) = entry {
                let code = InvitationCode {
                    code: code_str,
                    kind,
                    issued_by,
                    created_at: Utc::now(),
                    expires_at,
                    used: false,
                    redeemed_by: None,
                };
                vacant.insert(code.clone());
                return code;
            }
        }
    }
}

/// Generate a code string with the kind prefix, e.g. `K-CPL-9X4TQZ`
fn generate_code_string(kind: ProfileKind) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect::<String>()
        .to_uppercase();
    format!("K-{}-{}", kind.code_prefix(), suffix)
}
