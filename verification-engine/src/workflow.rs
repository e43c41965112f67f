//! Verification workflow
//!
//! State machine per request: Pending → Approved | Rejected, decided exactly
//! once. At most one pending request exists per account; the check and the
//! reservation happen under the account's entry in the pending index, so
//! concurrent submissions cannot both get through.

use crate::error::{Error, Result};
use crate::identity;
use crate::oracle::RiskOracle;
use crate::types::{
    Decision, IdentityPayload, RequestStatus, RiskReport, VerificationRequest,
};
use account_core::{AccountId, AccountStore};
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// VerificationWorkflow manages submissions and operator decisions
pub struct VerificationWorkflow {
    requests: DashMap<Uuid, VerificationRequest>,
    // One entry per account with an undecided request.
    pending_by_account: DashMap<AccountId, Uuid>,
    accounts: Arc<AccountStore>,
}

impl VerificationWorkflow {
    /// Create a workflow over the given account store
    pub fn new(accounts: Arc<AccountStore>) -> Self {
        Self {
            requests: DashMap::new(),
            pending_by_account: DashMap::new(),
            accounts,
        }
    }

    /// Fetch a request by id
    pub fn get(&self, request_id: &Uuid) -> Result<VerificationRequest> {
        self.requests
            .get(request_id)
            .map(|r| r.clone())
            .ok_or(Error::NotFound(*request_id))
    }

    /// The account's undecided request id, if any
    pub fn pending_for(&self, account_id: &AccountId) -> Option<Uuid> {
        self.pending_by_account.get(account_id).map(|r| *r)
    }

    /// All pending requests, oldest first (review queue)
    pub fn pending(&self) -> Vec<VerificationRequest> {
        let mut queue: Vec<VerificationRequest> = self
            .requests
            .iter()
            .filter(|r| r.status == RequestStatus::Pending)
            .map(|r| r.clone())
            .collect();
        queue.sort_by_key(|r| r.submitted_at);
        queue
    }

    /// Submit identity evidence for review
    ///
    /// The age gate is enforced here, before the request is queued. Fails
    /// with `AlreadyPending` if an undecided request exists for the account.
    pub fn submit(
        &self,
        account_id: &AccountId,
        payload: IdentityPayload,
    ) -> Result<VerificationRequest> {
        let account = self.accounts.get(account_id)?;
        let today = Utc::now().date_naive();
        identity::validate(account.profile_kind, &payload, today)?;

        // Reservation and check share the account's entry in the index.
        match self.pending_by_account.entry(account_id.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                Err(Error::AlreadyPending(account_id.clone()))
            }
            dashmap::mapref::entry::Entry::Vacant(vacant) => {
                // The hold keeps the account un-deletable while the request
                // is open; taken before anything becomes visible.
                self.accounts.hold(account_id)?;

                let request = VerificationRequest {
                    id: Uuid::new_v4(),
                    account_id: account_id.clone(),
                    submitted_at: Utc::now(),
                    status: RequestStatus::Pending,
                    identity: payload,
                    risk_report: None,
                    decided_at: None,
                };
                self.requests.insert(request.id, request.clone());
                vacant.insert(request.id);

                info!("Verification request {} submitted by {}", request.id, account_id);
                Ok(request)
            }
        }
    }

    /// Decide a pending request
    ///
    /// Approval assigns the tier (never downgrading) and recomputes the
    /// trust score; rejection leaves the account untouched and frees it to
    /// resubmit. Either way the request is terminal afterwards.
    pub fn decide(&self, request_id: &Uuid, decision: Decision) -> Result<VerificationRequest> {
        // Validate everything before the first write: terminal requests and
        // tier downgrades must leave no partial state behind.
        let account_id = {
            let entry = self
                .requests
                .get(request_id)
                .ok_or(Error::NotFound(*request_id))?;
            if entry.status.is_terminal() {
                return Err(Error::InvalidTransition(format!(
                    "request {} is already decided",
                    request_id
                )));
            }
            entry.account_id.clone()
        };

        let account = self.accounts.get(&account_id)?;
        if let Decision::Approve(tier) = decision {
            if tier < account.tier {
                return Err(Error::InvalidTransition(format!(
                    "cannot downgrade {} from {} to {} via approval",
                    account_id, account.tier, tier
                )));
            }
        }

        let decided = {
            let mut entry = self
                .requests
                .get_mut(request_id)
                .ok_or(Error::NotFound(*request_id))?;
            // Re-check under the entry lock: another operator may have won.
            if entry.status.is_terminal() {
                return Err(Error::InvalidTransition(format!(
                    "request {} is already decided",
                    request_id
                )));
            }
            entry.status = match decision {
                Decision::Approve(_) => RequestStatus::Approved,
                Decision::Reject => RequestStatus::Rejected,
            };
            entry.decided_at = Some(Utc::now());
            entry.clone()
        };

        // The hold is released only after the account mutation: the account
        // must stay un-deletable until the decision fully lands.
        match decision {
            Decision::Approve(tier) => {
                let score = self.accounts.update_tier(&account_id, tier)?;
                info!(
                    "Request {} approved: {} -> {} (score {})",
                    request_id, account_id, tier, score
                );
            }
            Decision::Reject => {
                info!("Request {} rejected for {}", request_id, account_id);
            }
        }

        self.pending_by_account.remove(&account_id);
        self.accounts.release(&account_id)?;

        Ok(decided)
    }

    /// Attach an oracle report to a still-pending request
    pub fn apply_risk_report(&self, request_id: &Uuid, report: RiskReport) -> Result<()> {
        let mut entry = self
            .requests
            .get_mut(request_id)
            .ok_or(Error::NotFound(*request_id))?;
        if entry.status.is_terminal() {
            return Err(Error::InvalidTransition(format!(
                "request {} was decided before the oracle responded",
                request_id
            )));
        }
        entry.risk_report = Some(report);
        Ok(())
    }

    /// Run the oracle for a pending request and store its report
    ///
    /// Degrades gracefully: an oracle failure is logged and the request
    /// stays decidable with no AI input.
    pub async fn run_oracle(&self, request_id: &Uuid, oracle: &dyn RiskOracle) -> Result<()> {
        let (payload, profile_kind) = {
            let entry = self
                .requests
                .get(request_id)
                .ok_or(Error::NotFound(*request_id))?;
            let account = self.accounts.get(&entry.account_id)?;
            (entry.identity.clone(), account.profile_kind)
        };

        let redacted = identity::redact(profile_kind, &payload, Utc::now().date_naive());
        match oracle.assess(&redacted).await {
            Ok(report) => self.apply_risk_report(request_id, report),
            Err(e) => {
                warn!("Risk oracle unavailable for {}: {}", request_id, e);
                Ok(())
            }
        }
    }
}
