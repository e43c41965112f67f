use account_core::AccountId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Report category, a closed set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportCategory {
    /// Fake profile / impersonation
    FakeProfile,
    /// Non-consensual content
    NonConsensualContent,
    /// Underage person
    Underage,
    /// Harassment
    Harassment,
    /// Scam or commercial spam
    Scam,
    /// Terms-of-service violation
    TermsViolation,
}

impl ReportCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportCategory::FakeProfile => "Fake profile / impersonation",
            ReportCategory::NonConsensualContent => "Non-consensual content",
            ReportCategory::Underage => "Underage",
            ReportCategory::Harassment => "Harassment",
            ReportCategory::Scam => "Scam / commercial spam",
            ReportCategory::TermsViolation => "Terms violation",
        }
    }

    /// Zero-tolerance categories can never surface below High severity
    /// and are flagged for escalation at the ops layer.
    pub fn is_zero_tolerance(&self) -> bool {
        matches!(
            self,
            ReportCategory::Underage | ReportCategory::NonConsensualContent
        )
    }
}

/// Report severity; orders the review queue, Critical first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// Report lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportStatus {
    Pending,
    Resolved,
    Dismissed,
}

impl ReportStatus {
    /// A report is decided exactly once
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ReportStatus::Pending)
    }
}

/// Action enacted by a moderator decision, recorded for audit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModerationAction {
    /// No effect on the reported account
    Dismiss,
    /// Strike +1 on the reported account
    Warn,
    /// Immediate, unconditional access lock
    Suspend,
}

impl ModerationAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationAction::Dismiss => "Dismiss",
            ModerationAction::Warn => "Warn",
            ModerationAction::Suspend => "Suspend",
        }
    }
}

/// A report filed by one account against another
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub reporter: AccountId,
    pub reported: AccountId,
    pub category: ReportCategory,
    pub description: String,
    /// References to screenshots or flagged content
    pub evidence_refs: Vec<String>,
    /// Severity as the reporter filed it
    pub submitted_severity: Severity,
    /// Effective severity after the zero-tolerance floor
    pub severity: Severity,
    /// Surfaced to the ops layer; the engine itself never auto-suspends
    pub requires_escalation: bool,
    pub status: ReportStatus,
    pub filed_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
    /// Set exactly once, by the moderator decision
    pub action: Option<ModerationAction>,
    pub moderator_notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }

    #[test]
    fn test_zero_tolerance_categories() {
        assert!(ReportCategory::Underage.is_zero_tolerance());
        assert!(ReportCategory::NonConsensualContent.is_zero_tolerance());
        assert!(!ReportCategory::Harassment.is_zero_tolerance());
        assert!(!ReportCategory::Scam.is_zero_tolerance());
    }
}
