//! External risk-scoring oracle
//!
//! The oracle is strictly advisory: it receives a redacted identity, its
//! output is stored opaquely on the request, and the engine compiles and
//! runs with no oracle configured at all. Operators can always decide
//! without it.

use crate::types::{RedactedIdentity, RiskReport};
use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

/// Oracle call failure
///
/// Deliberately not part of the workflow error taxonomy: an unavailable
/// oracle degrades to "no AI input", it never fails a decision.
#[derive(Error, Debug)]
#[error("Risk oracle error: {0}")]
pub struct OracleError(pub String);

/// An external risk-assessment service
#[async_trait]
pub trait RiskOracle: Send + Sync {
    /// Assess a redacted identity payload
    async fn assess(&self, identity: &RedactedIdentity) -> Result<RiskReport, OracleError>;
}

/// HTTP-backed oracle client
pub struct HttpRiskOracle {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRiskOracle {
    /// Create a client against the given service base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl RiskOracle for HttpRiskOracle {
    async fn assess(&self, identity: &RedactedIdentity) -> Result<RiskReport, OracleError> {
        let url = format!("{}/v1/assess", self.base_url);
        debug!("Requesting risk assessment from {}", url);

        let response = self
            .client
            .post(&url)
            .json(identity)
            .send()
            .await
            .map_err(|e| OracleError(e.to_string()))?;

        let response = response
            .error_for_status()
            .map_err(|e| OracleError(e.to_string()))?;

        response
            .json::<RiskReport>()
            .await
            .map_err(|e| OracleError(e.to_string()))
    }
}

/// Canned oracle for demos and tests
///
/// Always recommends manual review, the conservative default.
pub struct SimulatedOracle;

#[async_trait]
impl RiskOracle for SimulatedOracle {
    async fn assess(&self, identity: &RedactedIdentity) -> Result<RiskReport, OracleError> {
        Ok(RiskReport {
            confidence: 88,
            age_check: identity.party_ages.iter().all(|age| *age >= 18),
            flags: vec!["Simulated assessment".to_string()],
            risk_level: "REVIEW".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simulated_oracle_reviews_everything() {
        let oracle = SimulatedOracle;
        let identity = RedactedIdentity {
            profile_kind: "Individual".to_string(),
            party_ages: vec![25],
        };

        let report = oracle.assess(&identity).await.unwrap();
        assert_eq!(report.risk_level, "REVIEW");
        assert!(report.age_check);
    }

    #[tokio::test]
    async fn test_simulated_oracle_flags_age_disagreement() {
        let oracle = SimulatedOracle;
        let identity = RedactedIdentity {
            profile_kind: "Couple".to_string(),
            party_ages: vec![25, 17],
        };

        let report = oracle.assess(&identity).await.unwrap();
        assert!(!report.age_check);
    }
}
