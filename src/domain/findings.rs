//! Core domain models for credit data findings and validation results
//!
//! Architecture: Rich Domain Models - Findings are entities with behavior, not just data
//! - Findings classify themselves by severity and know which field they concern
//! - ValidationReport acts as an aggregate root managing collections of findings
//! - Validity is always derived from the accumulated findings, never set directly

use serde::{Deserialize, Serialize};

/// Severity levels for credit data findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational messages and suggestions
    Info,
    /// Advisories that should be reviewed but don't invalidate the data
    Warning,
    /// Problems that make the credit data unusable
    Error,
}

impl Severity {
    /// Whether this severity level invalidates the data
    pub fn is_blocking(self) -> bool {
        matches!(self, Self::Error)
    }

    /// Convert to string for display
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A single finding produced while validating credit data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Unique identifier for the check that produced this finding
    pub rule_id: String,
    /// Severity level of this finding
    pub severity: Severity,
    /// Credit data field the finding concerns (e.g. "score", "report_date")
    pub field: Option<String>,
    /// Human-readable description of the finding
    pub message: String,
}

impl Finding {
    /// Create a new finding
    pub fn new(rule_id: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self { rule_id: rule_id.into(), severity, field: None, message: message.into() }
    }

    /// Attach the credit data field this finding concerns
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Whether this finding invalidates the data
    pub fn is_blocking(&self) -> bool {
        self.severity.is_blocking()
    }

    /// Format finding for display
    pub fn format_display(&self) -> String {
        match &self.field {
            Some(field) => {
                format!("{} [{}] {}", field, self.severity.as_str(), self.message)
            }
            None => format!("[{}] {}", self.severity.as_str(), self.message),
        }
    }
}

/// Count of findings by severity level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingCounts {
    pub error: usize,
    pub warning: usize,
    pub info: usize,
}

impl FindingCounts {
    /// Total number of findings across all severities
    pub fn total(&self) -> usize {
        self.error + self.warning + self.info
    }

    /// Whether there are any blocking findings
    pub fn has_blocking(&self) -> bool {
        self.error > 0
    }

    /// Add a finding to the counts
    pub fn add(&mut self, severity: Severity) {
        match severity {
            Severity::Error => self.error += 1,
            Severity::Warning => self.warning += 1,
            Severity::Info => self.info += 1,
        }
    }
}

/// Complete validation result for one piece of credit data
///
/// Findings are kept in the order the checks emitted them. Each validator
/// returns a fresh report; reports are never mutated after being returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// All findings accumulated during validation
    pub findings: Vec<Finding>,
    /// Finding counts by severity
    pub counts: FindingCounts,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self { findings: Vec::new(), counts: FindingCounts::default() }
    }

    /// Add a finding to the report
    pub fn add_finding(&mut self, finding: Finding) {
        self.counts.add(finding.severity);
        self.findings.push(finding);
    }

    /// Whether the validated data is usable. Derived: no error findings.
    pub fn is_valid(&self) -> bool {
        !self.counts.has_blocking()
    }

    /// Whether the report contains any findings at all
    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }

    /// Whether the report contains warning findings
    pub fn has_warnings(&self) -> bool {
        self.counts.warning > 0
    }

    /// Error messages, in emission order
    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.findings_by_severity(Severity::Error).map(|f| f.message.as_str())
    }

    /// Warning messages, in emission order
    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.findings_by_severity(Severity::Warning).map(|f| f.message.as_str())
    }

    /// Get findings of a specific severity
    pub fn findings_by_severity(&self, severity: Severity) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.severity == severity)
    }

    /// Merge another report into this one, preserving its finding order
    pub fn merge(&mut self, other: ValidationReport) {
        for finding in other.findings {
            self.add_finding(finding);
        }
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Error types for operations that cannot produce a partial result
#[derive(Debug, thiserror::Error)]
pub enum CreditError {
    /// Policy file could not be loaded or parsed
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// File could not be read or accessed
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// A score outside the standardized FICO range
    #[error("Invalid FICO score: {score}. Must be between 300-850.")]
    Score { score: f64 },

    /// Validation gate failed
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl CreditError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }
}

/// Result type for credit-guardian operations
pub type CreditResult<T> = Result<T, CreditError>;
