//! Rendering of validation results and score cards
//!
//! CDD Principle: Anti-Corruption Layer - Formatters translate domain objects to external formats
//! - ValidationReport (domain) is converted to various external representations
//! - Each formatter encapsulates the rules for its specific output format
//! - Domain logic remains pure while supporting multiple presentation needs

use crate::domain::credit::ScoreProjection;
use crate::domain::findings::{CreditError, CreditResult, Finding, Severity, ValidationReport};
use crate::domain::score::FicoScore;
use std::io::Write;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format with colors
    Human,
    /// JSON format for programmatic consumption
    Json,
    /// One finding per line, no decoration, for scripting
    Plain,
}

impl OutputFormat {
    /// Parse format from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "human" => Some(Self::Human),
            "json" => Some(Self::Json),
            "plain" => Some(Self::Plain),
            _ => None,
        }
    }

    /// Get all available format names
    pub fn all_formats() -> &'static [&'static str] {
        &["human", "json", "plain"]
    }
}

/// Options for customizing rendered output
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Whether to use colored output (for human format)
    pub use_colors: bool,
    /// Maximum number of findings to include
    pub max_findings: Option<usize>,
    /// Minimum severity level to include
    pub min_severity: Option<Severity>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { use_colors: true, max_findings: None, min_severity: None }
    }
}

/// A credit score prepared for display
///
/// Holding a `FicoScore` means an out-of-range value cannot reach rendering;
/// the range rule lives in one place for validators and display alike.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreCard {
    score: FicoScore,
    factors: Vec<String>,
}

impl ScoreCard {
    /// Create a score card for an in-range score
    pub fn new(score: FicoScore) -> Self {
        Self { score, factors: Vec::new() }
    }

    /// Attach key factor lines shown under the score
    pub fn with_factors(mut self, factors: Vec<String>) -> Self {
        self.factors = factors;
        self
    }

    /// The score being displayed
    pub fn score(&self) -> FicoScore {
        self.score
    }

    /// Key factor lines
    pub fn factors(&self) -> &[String] {
        &self.factors
    }
}

/// Main formatter that dispatches to specific output formats
pub struct ReportFormatter {
    options: ReportOptions,
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new(ReportOptions::default())
    }
}

impl ReportFormatter {
    /// Create a new formatter with options
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    /// Format a validation report in the specified format
    pub fn format_report(
        &self,
        report: &ValidationReport,
        format: OutputFormat,
    ) -> CreditResult<String> {
        let filtered = self.filter_findings(&report.findings);

        match format {
            OutputFormat::Human => Ok(self.format_human(report, &filtered)),
            OutputFormat::Json => self.format_json(report, &filtered),
            OutputFormat::Plain => Ok(self.format_plain(&filtered)),
        }
    }

    /// Write a formatted report to a writer
    pub fn write_report<W: Write>(
        &self,
        report: &ValidationReport,
        format: OutputFormat,
        mut writer: W,
    ) -> CreditResult<()> {
        let formatted = self.format_report(report, format)?;
        writer.write_all(formatted.as_bytes()).map_err(|e| CreditError::Io { source: e })?;
        Ok(())
    }

    /// Format a score card in the specified format
    pub fn format_score_card(&self, card: &ScoreCard, format: OutputFormat) -> CreditResult<String> {
        let band = card.score().band();

        match format {
            OutputFormat::Human => {
                let mut output = String::new();
                output.push_str("💳 Credit Score\n");

                if self.options.use_colors {
                    let color = band.ansi_color();
                    output.push_str(&format!("   \x1b[1m\x1b[{}m{}\x1b[0m\n", color, card.score()));
                    output.push_str(&format!("   \x1b[{}m{}\x1b[0m\n", color, band.label()));
                } else {
                    output.push_str(&format!("   {}\n", card.score()));
                    output.push_str(&format!("   {}\n", band.label()));
                }

                if !card.factors().is_empty() {
                    output.push_str("\nKey Factors:\n");
                    for factor in card.factors() {
                        output.push_str(&format!("  - {factor}\n"));
                    }
                }

                Ok(output)
            }
            OutputFormat::Json => {
                let json_card = serde_json::json!({
                    "score": card.score().get(),
                    "band": band,
                    "label": band.label(),
                    "color": band.hex_color(),
                    "factors": card.factors(),
                });
                serde_json::to_string_pretty(&json_card)
                    .map_err(|e| CreditError::config(format!("JSON serialization failed: {e}")))
            }
            OutputFormat::Plain => {
                Ok(format!("{} {}\n", card.score(), band.label()))
            }
        }
    }

    /// Format a score improvement projection
    pub fn format_projection(
        &self,
        current: FicoScore,
        projection: &ScoreProjection,
        format: OutputFormat,
    ) -> CreditResult<String> {
        match format {
            OutputFormat::Human => {
                let mut output = String::new();
                output.push_str("📈 Score Improvement Projection\n");
                output.push_str(&format!("   Current score:   {current}\n"));
                output.push_str(&format!(
                    "   Potential score: {}\n",
                    projection.potential_score
                ));

                let points = projection.improvement_points;
                if self.options.use_colors && points > 0 {
                    output.push_str(&format!("   Improvement:     \x1b[32m+{points}\x1b[0m\n"));
                } else {
                    output.push_str(&format!("   Improvement:     +{points}\n"));
                }
                Ok(output)
            }
            OutputFormat::Json => {
                let json_projection = serde_json::json!({
                    "current_score": current.get(),
                    "potential_score": projection.potential_score.get(),
                    "improvement_points": projection.improvement_points,
                });
                serde_json::to_string_pretty(&json_projection)
                    .map_err(|e| CreditError::config(format!("JSON serialization failed: {e}")))
            }
            OutputFormat::Plain => Ok(format!(
                "{} {} +{}\n",
                current, projection.potential_score, projection.improvement_points
            )),
        }
    }

    /// Filter findings based on report options
    fn filter_findings<'a>(&self, findings: &'a [Finding]) -> Vec<&'a Finding> {
        let mut filtered: Vec<&Finding> = findings
            .iter()
            .filter(|f| {
                if let Some(min_severity) = self.options.min_severity {
                    if f.severity < min_severity {
                        return false;
                    }
                }
                true
            })
            .collect();

        if let Some(max) = self.options.max_findings {
            filtered.truncate(max);
        }

        filtered
    }

    /// Format report in human-readable format
    fn format_human(&self, report: &ValidationReport, findings: &[&Finding]) -> String {
        let mut output = String::new();

        if findings.is_empty() {
            if self.options.use_colors {
                output.push_str("✅ \x1b[32mNo credit data findings\x1b[0m\n");
            } else {
                output.push_str("✅ No credit data findings\n");
            }
        } else {
            // Header
            let icon = if report.is_valid() { "⚠️" } else { "❌" };
            if self.options.use_colors {
                let color = if report.is_valid() { "33" } else { "31" };
                output.push_str(&format!("{icon} \x1b[{color}mCredit Data Findings\x1b[0m\n\n"));
            } else {
                output.push_str(&format!("{icon} Credit Data Findings\n\n"));
            }

            // Group findings by field
            let mut by_field: std::collections::BTreeMap<&str, Vec<&Finding>> =
                std::collections::BTreeMap::new();

            for finding in findings {
                by_field.entry(finding.field.as_deref().unwrap_or("general")).or_default().push(finding);
            }

            for (field, field_findings) in by_field {
                output.push_str(&format!("📋 {field}\n"));

                for finding in field_findings {
                    let severity_color = match finding.severity {
                        Severity::Error => "31",   // Red
                        Severity::Warning => "33", // Yellow
                        Severity::Info => "36",    // Cyan
                    };

                    if self.options.use_colors {
                        output.push_str(&format!(
                            "  \x1b[2m{}\x1b[0m [\x1b[{}m{}\x1b[0m] {}\n",
                            finding.rule_id,
                            severity_color,
                            finding.severity.as_str(),
                            finding.message
                        ));
                    } else {
                        output.push_str(&format!(
                            "  {} [{}] {}\n",
                            finding.rule_id,
                            finding.severity.as_str(),
                            finding.message
                        ));
                    }
                }

                output.push('\n');
            }
        }

        output.push_str(&self.format_summary(report));
        output
    }

    /// Format report in JSON format
    fn format_json(&self, report: &ValidationReport, findings: &[&Finding]) -> CreditResult<String> {
        let json_findings: Vec<serde_json::Value> = findings
            .iter()
            .map(|f| {
                serde_json::json!({
                    "rule_id": f.rule_id,
                    "severity": f.severity.as_str(),
                    "field": f.field,
                    "message": f.message,
                })
            })
            .collect();

        let json_report = serde_json::json!({
            "is_valid": report.is_valid(),
            "findings": json_findings,
            "counts": {
                "error": report.counts.error,
                "warning": report.counts.warning,
                "info": report.counts.info,
            },
        });

        serde_json::to_string_pretty(&json_report)
            .map_err(|e| CreditError::config(format!("JSON serialization failed: {e}")))
    }

    /// Format report with one finding per line
    fn format_plain(&self, findings: &[&Finding]) -> String {
        let mut output = String::new();
        for finding in findings {
            output.push_str(&finding.format_display());
            output.push('\n');
        }
        output
    }

    /// Format the summary section
    fn format_summary(&self, report: &ValidationReport) -> String {
        let mut summary = String::new();

        if self.options.use_colors {
            summary.push_str("📊 \x1b[1mSummary:\x1b[0m ");
        } else {
            summary.push_str("📊 Summary: ");
        }

        let counts = &report.counts;
        if counts.total() == 0 {
            if self.options.use_colors {
                summary.push_str("\x1b[32m0 findings\x1b[0m\n");
            } else {
                summary.push_str("0 findings\n");
            }
        } else {
            let mut parts = Vec::new();

            if counts.error > 0 {
                let text =
                    format!("{} error{}", counts.error, if counts.error == 1 { "" } else { "s" });
                if self.options.use_colors {
                    parts.push(format!("\x1b[31m{text}\x1b[0m"));
                } else {
                    parts.push(text);
                }
            }

            if counts.warning > 0 {
                let text = format!(
                    "{} warning{}",
                    counts.warning,
                    if counts.warning == 1 { "" } else { "s" }
                );
                if self.options.use_colors {
                    parts.push(format!("\x1b[33m{text}\x1b[0m"));
                } else {
                    parts.push(text);
                }
            }

            if counts.info > 0 {
                let text = format!("{} info", counts.info);
                if self.options.use_colors {
                    parts.push(format!("\x1b[36m{text}\x1b[0m"));
                } else {
                    parts.push(text);
                }
            }

            summary.push_str(&parts.join(", "));
            summary.push('\n');
        }

        summary
    }
}
