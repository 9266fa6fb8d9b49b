//! Matcher configuration
//!
//! Loaded from TOML, e.g.
//!
//! ```toml
//! service_account_prefix = "system:serviceaccount:"
//! exclude_evaluation = "parallel"
//! ```
//!
//! Every key is optional and falls back to the defaults below.

use crate::error::Result;
use crate::rbac::SERVICE_ACCOUNT_PREFIX;
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

/// How the three exclude groups are evaluated
///
/// Both modes produce identical decisions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExcludeEvaluation {
    /// One group after the other on the calling thread
    #[default]
    Sequential,
    /// Groups evaluated on scoped threads, joined before combining
    Parallel,
}

/// Admission matcher settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct MatcherConfig {
    /// Username marker that precedes `<namespace>:<name>` for service accounts
    #[validate(length(min = 1, message = "service account prefix must not be empty"))]
    pub service_account_prefix: String,

    pub exclude_evaluation: ExcludeEvaluation,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        MatcherConfig {
            service_account_prefix: SERVICE_ACCOUNT_PREFIX.to_string(),
            exclude_evaluation: ExcludeEvaluation::default(),
        }
    }
}

impl MatcherConfig {
    /// Parse and validate config from a TOML string
    pub fn from_toml(toml: &str) -> Result<Self> {
        let config: MatcherConfig = toml::from_str(toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn with_service_account_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.service_account_prefix = prefix.into();
        self
    }

    pub fn with_exclude_evaluation(mut self, mode: ExcludeEvaluation) -> Self {
        self.exclude_evaluation = mode;
        self
    }
}
