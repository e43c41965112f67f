//! Trust scoring engine
//!
//! The score is a pure function of the account's current state: additive,
//! order-independent, and clamped to 0-100 at the end. Verification tiers
//! earn trust slowly; report penalties are uncapped before clamping, so
//! trust is revocable faster than it is earned.

use crate::types::{TrustAssessment, TrustLevel, TrustScore};
use serde::{Deserialize, Serialize};

/// Score weight configuration
///
/// Defaults reproduce the platform's published scoring table. Operators can
/// tune individual weights without code changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Base score every account starts from
    pub base: i32,

    /// Bonus for reaching contact verification (tier rank 1)
    pub tier_contact: i32,

    /// Bonus for reaching identity verification (tier rank 2)
    pub tier_identity: i32,

    /// Bonus for passing human review (tier rank 3)
    pub tier_human_review: i32,

    /// Bonus for premium video verification (tier rank 4)
    pub tier_video: i32,

    /// Bonus once the account is older than 30 days
    pub age_over_30_days: i32,

    /// Additional bonus once the account is older than 180 days
    pub age_over_180_days: i32,

    /// Bonus for a paying subscription
    pub premium: i32,

    /// Penalty per report resolved against the account
    pub report_penalty: i32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            base: 10,
            tier_contact: 10,
            tier_identity: 25,
            tier_human_review: 15,
            tier_video: 20,
            age_over_30_days: 10,
            age_over_180_days: 10,
            premium: 10,
            report_penalty: 20,
        }
    }
}

/// Inputs to the score function
///
/// `tier_rank` is the verification tier ordinal: 0 unverified, 1 contact,
/// 2 identity, 3 human review, 4 premium video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreInputs {
    /// Verification tier ordinal (0-4)
    pub tier_rank: u8,

    /// Account age in whole days
    pub account_age_days: i64,

    /// Paying subscription flag
    pub premium: bool,

    /// Reports resolved against the account with an enacted action
    pub reports_received: u32,
}

/// Trust scorer
#[derive(Debug, Clone)]
pub struct TrustScorer {
    weights: ScoreWeights,
}

impl TrustScorer {
    /// Create new trust scorer
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    /// The configured weights
    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Compute the trust score for the given inputs
    ///
    /// Pure and idempotent: the same inputs always produce the same score.
    pub fn score(&self, inputs: &ScoreInputs) -> TrustScore {
        let w = &self.weights;
        let mut raw = w.base;

        if inputs.tier_rank >= 1 {
            raw += w.tier_contact;
        }
        if inputs.tier_rank >= 2 {
            raw += w.tier_identity;
        }
        if inputs.tier_rank >= 3 {
            raw += w.tier_human_review;
        }
        if inputs.tier_rank >= 4 {
            raw += w.tier_video;
        }

        if inputs.account_age_days > 30 {
            raw += w.age_over_30_days;
        }
        if inputs.account_age_days > 180 {
            raw += w.age_over_180_days;
        }

        if inputs.premium {
            raw += w.premium;
        }

        raw -= w.report_penalty * inputs.reports_received as i32;

        TrustScore::from_raw(raw)
    }

    /// Score with a factor breakdown for operator display
    pub fn assess(&self, subject: impl Into<String>, inputs: &ScoreInputs) -> TrustAssessment {
        let w = &self.weights;
        let mut factors = Vec::new();

        if inputs.tier_rank >= 1 {
            factors.push("Contact verified".to_string());
        }
        if inputs.tier_rank >= 2 {
            factors.push("Identity documents verified".to_string());
        }
        if inputs.tier_rank >= 3 {
            factors.push("Passed human review".to_string());
        }
        if inputs.tier_rank >= 4 {
            factors.push("Premium video verification".to_string());
        }
        if inputs.account_age_days > 30 {
            factors.push("Account older than 30 days".to_string());
        }
        if inputs.account_age_days > 180 {
            factors.push("Account older than 180 days".to_string());
        }
        if inputs.premium {
            factors.push("Paying subscriber".to_string());
        }
        if inputs.reports_received > 0 {
            factors.push(format!(
                "{} report(s) resolved against account",
                inputs.reports_received
            ));
        }

        let score = self.score(inputs);

        TrustAssessment {
            subject: subject.into(),
            score,
            level: TrustLevel::from(score),
            factors,
            assessed_at: chrono::Utc::now(),
        }
    }
}

impl Default for TrustScorer {
    fn default() -> Self {
        Self::new(ScoreWeights::default())
    }
}
