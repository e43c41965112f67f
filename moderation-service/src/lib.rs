//! Velvet Moderation Service
//!
//! Ingests reports against accounts and converts moderator decisions into
//! strikes, suspensions, or dismissals. Severity orders the queue but never
//! triggers an action by itself: every resolution is an explicit human
//! decision, and every enacted action lands on a hash-chained audit trail.

pub mod audit;
pub mod engine;
pub mod error;
pub mod queue;
pub mod types;

pub use audit::{AuditLog, AuditRecord};
pub use engine::ModerationEngine;
pub use error::{Error, Result};
pub use queue::ReportQueue;
pub use types::{ModerationAction, Report, ReportCategory, ReportStatus, Severity};
