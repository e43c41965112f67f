//! Issuer quota configuration
//!
//! The lifetime mint cap is a property of the issuing account's profile
//! kind, not a global constant; operators tune it per kind without code
//! changes.

use crate::error::{Error, Result};
use account_core::ProfileKind;
use serde::{Deserialize, Serialize};

/// Per-kind lifetime invitation quota
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotaConfig {
    /// Cap for individual issuers
    pub individual_cap: u32,

    /// Cap for couple issuers
    pub couple_cap: u32,

    /// Cap for establishment issuers (high-volume referrers)
    pub establishment_cap: u32,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            individual_cap: 5,       // end users share a handful of codes
            couple_cap: 5,
            establishment_cap: 999,  // operator-assigned, effectively unbounded
        }
    }
}

impl QuotaConfig {
    /// Cap for an issuer of the given profile kind
    pub fn cap_for(&self, kind: ProfileKind) -> u32 {
        match kind {
            ProfileKind::Individual => self.individual_cap,
            ProfileKind::Couple => self.couple_cap,
            ProfileKind::Establishment => self.establishment_cap,
        }
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;
        let config: QuotaConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = QuotaConfig::default();

        if let Ok(cap) = std::env::var("VELVET_INDIVIDUAL_CODE_CAP") {
            config.individual_cap = cap
                .parse()
                .map_err(|e| Error::Config(format!("Bad VELVET_INDIVIDUAL_CODE_CAP: {}", e)))?;
        }

        if let Ok(cap) = std::env::var("VELVET_COUPLE_CODE_CAP") {
            config.couple_cap = cap
                .parse()
                .map_err(|e| Error::Config(format!("Bad VELVET_COUPLE_CODE_CAP: {}", e)))?;
        }

        if let Ok(cap) = std::env::var("VELVET_ESTABLISHMENT_CODE_CAP") {
            config.establishment_cap = cap
                .parse()
                .map_err(|e| Error::Config(format!("Bad VELVET_ESTABLISHMENT_CODE_CAP: {}", e)))?;
        }

        Ok(config)
    }
}
