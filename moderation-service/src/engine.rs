//! Moderation decision engine
//!
//! Report lifecycle: Pending → Dismissed | Resolved, decided exactly once.
//! A resolution always carries one of three enacted actions. Severity and
//! any AI recommendation are advisory only; nothing here fires without an
//! explicit moderator decision.

use crate::audit::{AuditLog, AuditRecord};
use crate::error::{Error, Result};
use crate::queue::ReportQueue;
use crate::types::{ModerationAction, Report, ReportStatus};
use account_core::{AccountStatus, AccountStore};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// ModerationEngine applies moderator decisions to reports and accounts
pub struct ModerationEngine {
    queue: Arc<ReportQueue>,
    accounts: Arc<AccountStore>,
    audit: AuditLog,
}

impl ModerationEngine {
    /// Create an engine over the given queue and account store
    pub fn new(queue: Arc<ReportQueue>, accounts: Arc<AccountStore>) -> Self {
        Self {
            queue,
            accounts,
            audit: AuditLog::new(),
        }
    }

    /// The report queue
    pub fn queue(&self) -> &ReportQueue {
        &self.queue
    }

    /// The audit trail of enacted actions
    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    /// Resolve a pending report with an explicit action
    ///
    /// - `Dismiss`: report marked Dismissed; no effect on the account.
    /// - `Warn`: report Resolved; strike +1; score recomputed.
    /// - `Suspend`: report Resolved; immediate access lock; score recomputed.
    ///
    /// Terminal afterwards; a second resolution is an invalid transition.
    pub fn resolve(
        &self,
        report_id: &Uuid,
        action: ModerationAction,
        moderator: &str,
        notes: Option<String>,
    ) -> Result<Report> {
        let decided = self.queue.with_mut(report_id, |report| {
            if report.status.is_terminal() {
                return Err(Error::InvalidTransition(format!(
                    "report {} is already decided",
                    report_id
                )));
            }
            report.status = match action {
                ModerationAction::Dismiss => ReportStatus::Dismissed,
                ModerationAction::Warn | ModerationAction::Suspend => ReportStatus::Resolved,
            };
            report.action = Some(action);
            report.decided_at = Some(Utc::now());
            report.moderator_notes = notes;
            Ok(report.clone())
        })?;

        match action {
            ModerationAction::Dismiss => {}
            ModerationAction::Warn => {
                let strikes = self.accounts.add_strike(&decided.reported)?;
                let score = self.accounts.record_report_resolved(&decided.reported)?;
                info!(
                    "Report {}: warned {} (strike #{}, score {})",
                    report_id, decided.reported, strikes, score
                );
            }
            ModerationAction::Suspend => {
                self.accounts
                    .update_status(&decided.reported, AccountStatus::Suspended)?;
                let score = self.accounts.record_report_resolved(&decided.reported)?;
                info!(
                    "Report {}: suspended {} (score {})",
                    report_id, decided.reported, score
                );
            }
        }

        self.accounts.release(&decided.reported)?;
        self.audit
            .append(*report_id, moderator, action, decided.reported.clone());

        Ok(decided)
    }

    /// The audit records concerning one account
    pub fn audit_for(&self, account: &account_core::AccountId) -> Vec<AuditRecord> {
        self.audit
            .records()
            .into_iter()
            .filter(|r| &r.subject == account)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ReportCategory, Severity};
    use account_core::{AccessLevel, AccountId, ProfileKind, VerificationTier};

    fn setup() -> (Arc<AccountStore>, ModerationEngine, AccountId, AccountId) {
        let accounts = Arc::new(AccountStore::default());
        let reporter = accounts
            .create_seeded(
                AccountId::generate(),
                "reporter",
                ProfileKind::Individual,
                Utc::now(),
            )
            .id;
        let reported = accounts
            .create_seeded(
                AccountId::generate(),
                "reported",
                ProfileKind::Individual,
                Utc::now(),
            )
            .id;
        let queue = Arc::new(ReportQueue::new(accounts.clone()));
        let engine = ModerationEngine::new(queue, accounts.clone());
        (accounts, engine, reporter, reported)
    }

    fn file(engine: &ModerationEngine, reporter: &AccountId, reported: &AccountId) -> Report {
        engine
            .queue()
            .file(
                reporter,
                reported,
                ReportCategory::Harassment,
                Severity::Critical,
                "threatening messages",
                vec![],
            )
            .unwrap()
    }

    #[test]
    fn test_dismiss_leaves_account_untouched() {
        let (accounts, engine, reporter, reported) = setup();
        let before = accounts.get(&reported).unwrap();
        let report = file(&engine, &reporter, &reported);

        let decided = engine
            .resolve(&report.id, ModerationAction::Dismiss, "mod-01", None)
            .unwrap();

        assert_eq!(decided.status, ReportStatus::Dismissed);
        let after = accounts.get(&reported).unwrap();
        assert_eq!(after.strikes, before.strikes);
        assert_eq!(after.status, before.status);
        assert_eq!(after.trust_score, before.trust_score);
        assert_eq!(after.reports_received, 0);
    }

    #[test]
    fn test_warn_adds_strike_and_lowers_score() {
        let (accounts, engine, reporter, reported) = setup();
        let report = file(&engine, &reporter, &reported);

        let decided = engine
            .resolve(
                &report.id,
                ModerationAction::Warn,
                "mod-01",
                Some("first warning".to_string()),
            )
            .unwrap();

        assert_eq!(decided.status, ReportStatus::Resolved);
        assert_eq!(decided.moderator_notes.as_deref(), Some("first warning"));

        let account = accounts.get(&reported).unwrap();
        assert_eq!(account.strikes, 1);
        assert_eq!(account.reports_received, 1);
        assert_eq!(account.status, AccountStatus::Active);
        // 10 base - 20 penalty, clamped
        assert_eq!(account.trust_score, 0);
    }

    #[test]
    fn test_suspend_locks_access_and_recomputes_score() {
        let (accounts, engine, reporter, reported) = setup();
        // Bring the account to a high score first: full video verification.
        accounts
            .update_tier(&reported, VerificationTier::VideoPremium)
            .unwrap();
        assert_eq!(accounts.get(&reported).unwrap().trust_score, 80);

        let report = file(&engine, &reporter, &reported);
        engine
            .resolve(&report.id, ModerationAction::Suspend, "mod-01", None)
            .unwrap();

        let account = accounts.get(&reported).unwrap();
        assert_eq!(account.status, AccountStatus::Suspended);
        assert_eq!(account.trust_score, 60); // 80 - 20, locked regardless
        assert_eq!(accounts.check_access(&reported).unwrap(), AccessLevel::Locked);
        // Suspension is not a strike.
        assert_eq!(account.strikes, 0);
    }

    #[test]
    fn test_resolve_twice_is_invalid() {
        let (_accounts, engine, reporter, reported) = setup();
        let report = file(&engine, &reporter, &reported);

        engine
            .resolve(&report.id, ModerationAction::Warn, "mod-01", None)
            .unwrap();
        let err = engine
            .resolve(&report.id, ModerationAction::Suspend, "mod-02", None)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidTransition(_)));
    }

    #[test]
    fn test_suspending_a_suspended_account_is_a_no_op() {
        let (accounts, engine, reporter, reported) = setup();
        let first = file(&engine, &reporter, &reported);
        let second = file(&engine, &reporter, &reported);

        engine
            .resolve(&first.id, ModerationAction::Suspend, "mod-01", None)
            .unwrap();
        // Second suspension resolves fine; the status write is idempotent.
        engine
            .resolve(&second.id, ModerationAction::Suspend, "mod-01", None)
            .unwrap();

        let account = accounts.get(&reported).unwrap();
        assert_eq!(account.status, AccountStatus::Suspended);
        assert_eq!(account.reports_received, 2);
    }

    #[test]
    fn test_every_resolution_is_audited() {
        let (_accounts, engine, reporter, reported) = setup();
        let first = file(&engine, &reporter, &reported);
        let second = file(&engine, &reporter, &reported);

        engine
            .resolve(&first.id, ModerationAction::Dismiss, "mod-01", None)
            .unwrap();
        engine
            .resolve(&second.id, ModerationAction::Warn, "mod-02", None)
            .unwrap();

        let trail = engine.audit().records();
        assert_eq!(trail.len(), 2);
        assert_eq!(trail[0].action, ModerationAction::Dismiss);
        assert_eq!(trail[1].action, ModerationAction::Warn);
        assert!(engine.audit().verify());
        assert_eq!(engine.audit_for(&reported).len(), 2);
        assert_eq!(engine.queue().decided().len(), 2);
        assert!(engine.queue().pending().is_empty());
    }

    #[test]
    fn test_resolution_releases_the_hold() {
        let (accounts, engine, reporter, reported) = setup();
        let report = file(&engine, &reporter, &reported);

        assert!(accounts.remove(&reported).is_err());
        engine
            .resolve(&report.id, ModerationAction::Dismiss, "mod-01", None)
            .unwrap();
        assert!(accounts.remove(&reported).is_ok());
    }
}
