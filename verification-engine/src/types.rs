use account_core::{AccountId, VerificationTier};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One person documented on an account
///
/// Couples document two parties; individuals and establishments one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityParty {
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    /// Reference to the uploaded ID document (storage is out of scope)
    pub id_document_ref: String,
    pub id_number: String,
}

/// Identity evidence submitted for review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityPayload {
    pub parties: Vec<IdentityParty>,
}

/// Verification request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    /// Approved and Rejected are terminal; a request is decided exactly once
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

/// Operator decision on a pending request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// Approve and assign the given tier (must not downgrade)
    Approve(VerificationTier),
    /// Reject; the account keeps its tier and may resubmit
    Reject,
}

/// Opaque result from the external risk-scoring oracle
///
/// Stored verbatim on the request. The engine never acts on `risk_level`;
/// only the human operator reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskReport {
    /// Oracle confidence, 0-100
    pub confidence: u8,
    /// Whether the oracle's own age estimate agrees with the documents
    pub age_check: bool,
    /// Free-form red flags for operator display
    pub flags: Vec<String>,
    /// Oracle verdict string, uninterpreted
    pub risk_level: String,
}

/// Redacted identity sent to the oracle
///
/// Carries no names, ID numbers, or document references: only what the
/// oracle needs for a risk estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactedIdentity {
    pub profile_kind: String,
    /// Computed age of each documented party, in submission order
    pub party_ages: Vec<i32>,
}

/// A verification request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationRequest {
    pub id: Uuid,
    pub account_id: AccountId,
    pub submitted_at: DateTime<Utc>,
    pub status: RequestStatus,
    /// Submitted evidence, held for the reviewing operator
    pub identity: IdentityPayload,
    /// Oracle output, if the oracle responded in time
    pub risk_report: Option<RiskReport>,
    pub decided_at: Option<DateTime<Utc>>,
}
