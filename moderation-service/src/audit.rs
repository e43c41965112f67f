//! Moderation audit trail
//!
//! Append-only, hash-chained record of every enacted action. Each record
//! hashes its own content plus the previous record's hash, so any tampering
//! with history breaks verification from that point on.

use crate::types::ModerationAction;
use account_core::AccountId;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

const GENESIS_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// One audited moderation action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: Uuid,
    /// Position in the chain
    pub seq: u64,
    /// The report the action resolved
    pub report_id: Uuid,
    /// Moderator who made the decision
    pub moderator: String,
    pub action: ModerationAction,
    /// Account the action applied to
    pub subject: AccountId,
    pub timestamp: DateTime<Utc>,
    /// Hash of the previous record (genesis zeros for the first)
    pub prev_hash: String,
    /// SHA-256 over this record's content and `prev_hash`
    pub hash: String,
}

/// Append-only moderation audit log
pub struct AuditLog {
    records: Mutex<Vec<AuditRecord>>,
}

impl AuditLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    /// Append an enacted action
    pub fn append(
        &self,
        report_id: Uuid,
        moderator: impl Into<String>,
        action: ModerationAction,
        subject: AccountId,
    ) -> AuditRecord {
        let mut records = self.records.lock();
        let prev_hash = records
            .last()
            .map(|r| r.hash.clone())
            .unwrap_or_else(|| GENESIS_HASH.to_string());

        let mut record = AuditRecord {
            id: Uuid::new_v4(),
            seq: records.len() as u64,
            report_id,
            moderator: moderator.into(),
            action,
            subject,
            timestamp: Utc::now(),
            prev_hash,
            hash: String::new(),
        };
        record.hash = compute_hash(&record);

        records.push(record.clone());
        record
    }

    /// Snapshot of the full trail
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().clone()
    }

    /// Number of audited actions
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Re-verify the whole chain
    pub fn verify(&self) -> bool {
        let records = self.records.lock();
        let mut prev = GENESIS_HASH.to_string();
        for (i, record) in records.iter().enumerate() {
            if record.seq != i as u64 || record.prev_hash != prev {
                return false;
            }
            if compute_hash(record) != record.hash {
                return false;
            }
            prev = record.hash.clone();
        }
        true
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new()
    }
}

fn compute_hash(record: &AuditRecord) -> String {
    // Everything except the hash field itself, in a fixed order.
    let content = serde_json::json!({
        "seq": record.seq,
        "report_id": record.report_id,
        "moderator": record.moderator,
        "action": record.action,
        "subject": record.subject,
        "timestamp": record.timestamp.to_rfc3339(),
        "prev_hash": record.prev_hash,
    });
    let digest = Sha256::digest(content.to_string().as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}
