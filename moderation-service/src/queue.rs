//! Report intake and review queue
//!
//! Filing validates both parties, floors the severity for zero-tolerance
//! categories, and takes a hold on the reported account so it cannot be
//! hard-deleted while the report is open.

use crate::error::{Error, Result};
use crate::types::{Report, ReportCategory, ReportStatus, Severity};
use account_core::{AccountId, AccountStore};
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// ReportQueue stores every report, keyed by id
pub struct ReportQueue {
    reports: DashMap<Uuid, Report>,
    accounts: Arc<AccountStore>,
}

impl ReportQueue {
    /// Create an empty queue over the given account store
    pub fn new(accounts: Arc<AccountStore>) -> Self {
        Self {
            reports: DashMap::new(),
            accounts,
        }
    }

    /// Fetch a report by id
    pub fn get(&self, id: &Uuid) -> Result<Report> {
        self.reports
            .get(id)
            .map(|r| r.clone())
            .ok_or(Error::NotFound(*id))
    }

    /// Total number of reports ever filed
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    /// Whether the queue holds no reports
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// File a report against an account
    ///
    /// Zero-tolerance categories are floored to High severity regardless of
    /// what the reporter submitted; they can be raised, never lowered.
    pub fn file(
        &self,
        reporter: &AccountId,
        reported: &AccountId,
        category: ReportCategory,
        severity: Severity,
        description: impl Into<String>,
        evidence_refs: Vec<String>,
    ) -> Result<Report> {
        if reporter == reported {
            return Err(Error::InvalidReport(
                "an account cannot report itself".to_string(),
            ));
        }
        // Reporter is only touched for audit; reported gets the hold.
        self.accounts.get(reporter)?;
        self.accounts.get(reported)?;

        let effective = if category.is_zero_tolerance() {
            severity.max(Severity::High)
        } else {
            severity
        };

        self.accounts.hold(reported)?;

        let report = Report {
            id: Uuid::new_v4(),
            reporter: reporter.clone(),
            reported: reported.clone(),
            category,
            description: description.into(),
            evidence_refs,
            submitted_severity: severity,
            severity: effective,
            requires_escalation: category.is_zero_tolerance(),
            status: ReportStatus::Pending,
            filed_at: Utc::now(),
            decided_at: None,
            action: None,
            moderator_notes: None,
        };
        self.reports.insert(report.id, report.clone());

        if report.requires_escalation {
            warn!(
                "Zero-tolerance report {} ({}) against {}",
                report.id,
                category.as_str(),
                reported
            );
        } else {
            info!("Report {} filed against {}", report.id, reported);
        }
        Ok(report)
    }

    /// Pending reports, most severe first, oldest first within a severity
    pub fn pending(&self) -> Vec<Report> {
        let mut queue: Vec<Report> = self
            .reports
            .iter()
            .filter(|r| r.status == ReportStatus::Pending)
            .map(|r| r.clone())
            .collect();
        queue.sort_by(|a, b| b.severity.cmp(&a.severity).then(a.filed_at.cmp(&b.filed_at)));
        queue
    }

    /// Decided reports (history view)
    pub fn decided(&self) -> Vec<Report> {
        let mut done: Vec<Report> = self
            .reports
            .iter()
            .filter(|r| r.status.is_terminal())
            .map(|r| r.clone())
            .collect();
        done.sort_by_key(|r| r.decided_at);
        done
    }

    /// Pending reports naming the given account
    pub fn pending_against(&self, account: &AccountId) -> Vec<Report> {
        self.reports
            .iter()
            .filter(|r| r.status == ReportStatus::Pending && &r.reported == account)
            .map(|r| r.clone())
            .collect()
    }

    pub(crate) fn with_mut<T>(
        &self,
        id: &Uuid,
        f: impl FnOnce(&mut Report) -> Result<T>,
    ) -> Result<T> {
        match self.reports.get_mut(id) {
            Some(mut report) => f(&mut report),
            None => Err(Error::NotFound(*id)),
        }
    }
}
