//! Credit Guardian - FCRA-aligned validation for consumer credit report data
//!
//! Architecture: Clean Architecture - Library interface serves as the application layer
//! - Pure domain logic separated from presentation concerns
//! - Clean boundaries between business rules and external dependencies
//! - Intake API gates untrusted drafts into typed credit reports

pub mod config;
pub mod domain;
pub mod report;
pub mod validator;

// Re-export main types for convenient access
pub use domain::credit::{Bureau, CreditReport, CreditReportDraft, ScoreProjection};
pub use domain::findings::{
    CreditError, CreditResult, Finding, FindingCounts, Severity, ValidationReport,
};
pub use domain::score::{FicoScore, ScoreBand};

pub use config::{Policy, PolicyBuilder};

pub use report::{OutputFormat, ReportFormatter, ReportOptions, ScoreCard};

use std::path::Path;

/// Main validator providing high-level credit data operations
pub struct CreditValidator {
    policy: Policy,
    report_formatter: ReportFormatter,
}

impl CreditValidator {
    /// Create a validator with the default policy
    pub fn new() -> Self {
        Self::with_policy(Policy::default())
    }

    /// Create a validator with the given policy
    pub fn with_policy(policy: Policy) -> Self {
        Self { policy, report_formatter: ReportFormatter::default() }
    }

    /// Create a validator loading policy from a YAML file
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> CreditResult<Self> {
        let policy = Policy::load_from_file(path)?;
        Ok(Self::with_policy(policy))
    }

    /// Set custom report formatter
    pub fn with_report_formatter(mut self, formatter: ReportFormatter) -> Self {
        self.report_formatter = formatter;
        self
    }

    /// The active policy
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Validate a complete credit report draft
    pub fn check_draft(&self, draft: &CreditReportDraft) -> ValidationReport {
        validator::validate_draft(draft, &self.policy)
    }

    /// Validate a credit score on its own
    pub fn check_score(&self, score: f64) -> ValidationReport {
        validator::validate_score(score, &self.policy)
    }

    /// Validate a declared purpose on its own
    pub fn check_purpose(&self, purpose: &str) -> ValidationReport {
        validator::validate_purpose(purpose, &self.policy)
    }

    /// Project the score improvement from removing negative items
    pub fn project(&self, current: u16, negative_items: u32) -> CreditResult<ScoreProjection> {
        validator::project_improvement(current, negative_items, &self.policy)
    }

    /// Build a score card for display, failing for out-of-range scores
    pub fn score_card(&self, score: u16) -> CreditResult<ScoreCard> {
        Ok(ScoreCard::new(FicoScore::new(score)?))
    }

    /// Format a validation report for output
    pub fn format_report(
        &self,
        report: &ValidationReport,
        format: OutputFormat,
    ) -> CreditResult<String> {
        self.report_formatter.format_report(report, format)
    }
}

impl Default for CreditValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to create a validator with the default policy
pub fn create_validator() -> CreditValidator {
    CreditValidator::new()
}

/// Convenience function to validate a JSON credit data document with default policy
pub fn validate_json(json: &str) -> CreditResult<ValidationReport> {
    let draft = CreditReportDraft::from_json(json)?;
    Ok(CreditValidator::new().check_draft(&draft))
}

/// Intake gates for credit data pipelines
pub mod intake {
    use super::*;
    use chrono::{DateTime, Utc};

    /// Admit a draft into the pipeline
    ///
    /// This function provides a simple interface for callers to gate credit
    /// data before further processing. It returns an error if any blocking
    /// findings are present, otherwise the resolved, typed report.
    pub fn accept_draft(draft: &CreditReportDraft, policy: &Policy) -> CreditResult<CreditReport> {
        let report = validator::validate_draft(draft, policy);

        if !report.is_valid() {
            let error_count = report.counts.error;
            return Err(CreditError::validation(format!(
                "Credit data intake failed: {} blocking finding{} found",
                error_count,
                if error_count == 1 { "" } else { "s" }
            )));
        }

        resolve(draft)
    }

    /// Admit a draft only when it is completely clean
    ///
    /// Strict variant for pipelines that refuse advisories as well: a stale
    /// report, a low-score advisory, or an off-list purpose all reject here.
    pub fn strict_accept(draft: &CreditReportDraft, policy: &Policy) -> CreditResult<CreditReport> {
        let report = validator::validate_draft(draft, policy);

        if report.has_findings() {
            let total = report.counts.total();
            return Err(CreditError::validation(format!(
                "Strict intake failed: {} finding{} present",
                total,
                if total == 1 { "" } else { "s" }
            )));
        }

        resolve(draft)
    }

    /// Resolve a validated draft into its typed form
    ///
    /// The bureau enumeration is enforced here, one layer above composite
    /// validation, which only checks the field's presence.
    fn resolve(draft: &CreditReportDraft) -> CreditResult<CreditReport> {
        let raw_score = draft
            .score
            .as_ref()
            .and_then(|v| v.as_f64())
            .ok_or_else(|| CreditError::validation("Credit score is missing"))?;
        let score = FicoScore::new(raw_score.round() as u16)?;

        let report_date: DateTime<Utc> = draft
            .report_date
            .as_deref()
            .and_then(validator::parse_report_date)
            .ok_or_else(|| CreditError::validation("Report date is missing or unreadable"))?;

        let bureau: Bureau = draft
            .bureau_source
            .as_deref()
            .ok_or_else(|| CreditError::validation("Bureau source is missing"))?
            .parse()?;

        let purpose = draft
            .permissible_purpose
            .as_ref()
            .and_then(|v| v.as_str())
            .ok_or_else(|| CreditError::validation("Permissible purpose is missing"))?
            .to_string();

        tracing::debug!(%bureau, score = score.get(), "credit report accepted");

        Ok(CreditReport { score, report_date, bureau, purpose })
    }
}
