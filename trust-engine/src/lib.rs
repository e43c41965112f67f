//! Trust Engine for Velvet
//!
//! Derives the 0-100 member trust score from verification progress,
//! account age, subscription status, and moderation history.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod scoring;
pub mod types;

pub use scoring::{ScoreInputs, ScoreWeights, TrustScorer};
pub use types::{TrustAssessment, TrustLevel, TrustScore};
