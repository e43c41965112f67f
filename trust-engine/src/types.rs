//! Core types for the trust engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Trust score (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrustScore(u8);

impl TrustScore {
    /// Create new trust score (0-100)
    pub fn new(score: u8) -> Self {
        Self(score.min(100))
    }

    /// Create from an unclamped signed accumulator
    ///
    /// Report penalties are uncapped on the downside, so the raw sum can be
    /// well below zero before clamping.
    pub fn from_raw(raw: i32) -> Self {
        Self(raw.clamp(0, 100) as u8)
    }

    /// Get raw score
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Check if high trust (>= 75)
    pub fn is_high_trust(&self) -> bool {
        self.0 >= 75
    }

    /// Check if medium trust (50-74)
    pub fn is_medium_trust(&self) -> bool {
        (50..75).contains(&self.0)
    }

    /// Check if low trust (< 50)
    pub fn is_low_trust(&self) -> bool {
        self.0 < 50
    }
}

/// Trust level band derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrustLevel {
    /// Low trust
    Low,
    /// Medium trust
    Medium,
    /// High trust
    High,
}

impl From<TrustScore> for TrustLevel {
    fn from(score: TrustScore) -> Self {
        if score.is_high_trust() {
            TrustLevel::High
        } else if score.is_medium_trust() {
            TrustLevel::Medium
        } else {
            TrustLevel::Low
        }
    }
}

/// Trust assessment result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustAssessment {
    /// Account the assessment applies to
    pub subject: String,

    /// Trust score
    pub score: TrustScore,

    /// Trust level band
    pub level: TrustLevel,

    /// Contributing factors, for operator display
    pub factors: Vec<String>,

    /// Assessment timestamp
    pub assessed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_clamps_above_100() {
        assert_eq!(TrustScore::new(150).value(), 100);
        assert_eq!(TrustScore::from_raw(240).value(), 100);
    }

    #[test]
    fn test_score_clamps_below_zero() {
        assert_eq!(TrustScore::from_raw(-60).value(), 0);
    }

    #[test]
    fn test_level_bands() {
        assert_eq!(TrustLevel::from(TrustScore::new(80)), TrustLevel::High);
        assert_eq!(TrustLevel::from(TrustScore::new(60)), TrustLevel::Medium);
        assert_eq!(TrustLevel::from(TrustScore::new(20)), TrustLevel::Low);
    }
}
