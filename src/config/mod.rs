//! Policy loading and management for Credit Guardian
//!
//! Architecture: Anti-Corruption Layer - Policy translates external YAML formats
//! - Raw YAML structures are converted to clean domain values
//! - Default policy values are embedded in the domain, not infrastructure
//! - The policy acts as a repository for the business constants the validators
//!   apply: purpose whitelist, freshness window, advisory floor, projection parameters

use crate::domain::findings::{CreditError, CreditResult};
use crate::domain::score::FicoScore;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main policy structure for Credit Guardian
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// Policy format version
    pub version: String,
    /// Permissible purpose whitelist
    pub purposes: PurposePolicy,
    /// Report freshness rules
    pub freshness: FreshnessPolicy,
    /// Advisory thresholds
    pub advisory: AdvisoryPolicy,
    /// Score improvement projection parameters
    pub improvement: ImprovementPolicy,
}

/// Whitelist of declared reasons for accessing a credit report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurposePolicy {
    /// Purposes accepted under FCRA Section 604. Membership only, order irrelevant.
    pub allowed: Vec<String>,
}

/// How old a report may get before a refresh advisory is raised
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreshnessPolicy {
    /// Reports older than this many days get a staleness warning
    pub max_report_age_days: i64,
}

/// Thresholds that raise advisories without invalidating data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryPolicy {
    /// In-range scores below this value get a data-accuracy warning
    pub low_score_floor: u16,
}

/// Parameters for the score improvement projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementPolicy {
    /// Average points recovered per negative item removed
    pub points_per_item: u16,
    /// Cap on total projected improvement regardless of item count
    pub max_total_points: u16,
}

impl Policy {
    /// Load policy from a YAML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CreditResult<Self> {
        let contents = fs::read_to_string(&path).map_err(|e| {
            CreditError::config(format!(
                "Failed to read policy file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let policy: Self = serde_yaml::from_str(&contents).map_err(|e| {
            CreditError::config(format!(
                "Failed to parse policy file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        policy.validate()?;
        Ok(policy)
    }

    /// Load policy from string content
    pub fn load_from_str(content: &str) -> CreditResult<Self> {
        let policy: Self = serde_yaml::from_str(content)
            .map_err(|e| CreditError::config(format!("Failed to parse policy: {e}")))?;

        policy.validate()?;
        Ok(policy)
    }

    /// Get the default policy with built-in FCRA values
    pub fn with_defaults() -> Self {
        Self {
            version: "1.0".to_string(),
            purposes: PurposePolicy {
                allowed: vec![
                    "credit_application".to_string(),
                    "account_review".to_string(),
                    "collection_activity".to_string(),
                    "employment_screening".to_string(),
                    "insurance_underwriting".to_string(),
                    "tenant_screening".to_string(),
                    "legitimate_business_need".to_string(),
                ],
            },
            freshness: FreshnessPolicy { max_report_age_days: 90 },
            advisory: AdvisoryPolicy { low_score_floor: 350 },
            improvement: ImprovementPolicy { points_per_item: 25, max_total_points: 200 },
        }
    }

    /// Validate the policy for consistency and correctness
    pub fn validate(&self) -> CreditResult<()> {
        // Check version compatibility
        if !["1.0"].contains(&self.version.as_str()) {
            return Err(CreditError::config(format!(
                "Unsupported policy version: {}. Supported versions: 1.0",
                self.version
            )));
        }

        if self.purposes.allowed.is_empty() {
            return Err(CreditError::config(
                "Permissible purpose whitelist must not be empty".to_string(),
            ));
        }

        for purpose in &self.purposes.allowed {
            if purpose.trim().is_empty() {
                return Err(CreditError::config(
                    "Permissible purpose entries must not be blank".to_string(),
                ));
            }
        }

        let has_duplicates = self
            .purposes
            .allowed
            .iter()
            .any(|p| self.purposes.allowed.iter().filter(|q| *q == p).count() > 1);
        if has_duplicates {
            return Err(CreditError::config(
                "Permissible purpose whitelist contains duplicates".to_string(),
            ));
        }

        if self.freshness.max_report_age_days <= 0 {
            return Err(CreditError::config(format!(
                "max_report_age_days must be positive, got {}",
                self.freshness.max_report_age_days
            )));
        }

        if !(FicoScore::MIN..=FicoScore::MAX).contains(&self.advisory.low_score_floor) {
            return Err(CreditError::config(format!(
                "low_score_floor must lie within the FICO range {}-{}, got {}",
                FicoScore::MIN,
                FicoScore::MAX,
                self.advisory.low_score_floor
            )));
        }

        if self.improvement.points_per_item == 0 {
            return Err(CreditError::config("points_per_item must be positive".to_string()));
        }

        if self.improvement.max_total_points < self.improvement.points_per_item {
            return Err(CreditError::config(format!(
                "max_total_points ({}) must not be below points_per_item ({})",
                self.improvement.max_total_points, self.improvement.points_per_item
            )));
        }

        Ok(())
    }

    /// Whether a purpose is on the whitelist
    pub fn is_permitted_purpose(&self, purpose: &str) -> bool {
        self.purposes.allowed.iter().any(|p| p == purpose)
    }

    /// Convert to JSON for serialization
    pub fn to_json(&self) -> CreditResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CreditError::config(format!("Failed to serialize policy: {e}")))
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Policy builder for programmatic construction
pub struct PolicyBuilder {
    policy: Policy,
}

impl PolicyBuilder {
    /// Create a new builder seeded with the default policy
    pub fn new() -> Self {
        Self { policy: Policy::default() }
    }

    /// Add a purpose to the whitelist
    pub fn allow_purpose(mut self, purpose: impl Into<String>) -> Self {
        self.policy.purposes.allowed.push(purpose.into());
        self
    }

    /// Replace the purpose whitelist
    pub fn purposes(mut self, purposes: Vec<String>) -> Self {
        self.policy.purposes.allowed = purposes;
        self
    }

    /// Set the report freshness window in days
    pub fn max_report_age_days(mut self, days: i64) -> Self {
        self.policy.freshness.max_report_age_days = days;
        self
    }

    /// Set the low-score advisory floor
    pub fn low_score_floor(mut self, floor: u16) -> Self {
        self.policy.advisory.low_score_floor = floor;
        self
    }

    /// Set the improvement projection parameters
    pub fn improvement(mut self, points_per_item: u16, max_total_points: u16) -> Self {
        self.policy.improvement = ImprovementPolicy { points_per_item, max_total_points };
        self
    }

    /// Build the final policy
    pub fn build(self) -> CreditResult<Policy> {
        self.policy.validate()?;
        Ok(self.policy)
    }
}

impl Default for PolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}
