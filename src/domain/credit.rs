//! Credit report data as submitted and as accepted
//!
//! Architecture: Anti-Corruption Layer - Drafts hold untrusted caller data
//! - `CreditReportDraft` keeps the loosely-typed shape callers actually send,
//!   so type problems become findings instead of deserialization failures
//! - `CreditReport` is the typed form that only exists once a draft passed
//!   composite validation

use crate::domain::findings::{CreditError, CreditResult};
use crate::domain::score::FicoScore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// The three reporting agencies a credit snapshot can originate from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum Bureau {
    Experian,
    Equifax,
    TransUnion,
}

impl Bureau {
    /// Canonical agency name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Experian => "Experian",
            Self::Equifax => "Equifax",
            Self::TransUnion => "TransUnion",
        }
    }

    /// All known agencies
    pub fn all() -> &'static [Bureau] {
        &[Self::Experian, Self::Equifax, Self::TransUnion]
    }
}

impl fmt::Display for Bureau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bureau {
    type Err = CreditError;

    fn from_str(s: &str) -> CreditResult<Self> {
        match s {
            "Experian" => Ok(Self::Experian),
            "Equifax" => Ok(Self::Equifax),
            "TransUnion" => Ok(Self::TransUnion),
            other => Err(CreditError::validation(format!("Unknown bureau source: {other}"))),
        }
    }
}

/// A credit report snapshot as submitted for validation
///
/// Fields mirror what callers send over the wire. `score` and
/// `permissible_purpose` stay raw JSON values: the validators report
/// wrong-typed input as findings rather than rejecting the whole payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditReportDraft {
    /// Credit score, expected to be a number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Value>,
    /// ISO-8601 date-time the report was produced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_date: Option<String>,
    /// Reporting agency that produced the snapshot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bureau_source: Option<String>,
    /// Declared reason for accessing the report, expected to be a string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissible_purpose: Option<Value>,
}

impl CreditReportDraft {
    /// Create an empty draft
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the score field
    pub fn with_score(mut self, score: impl Into<Value>) -> Self {
        self.score = Some(score.into());
        self
    }

    /// Set the report date field
    pub fn with_report_date(mut self, date: impl Into<String>) -> Self {
        self.report_date = Some(date.into());
        self
    }

    /// Set the bureau source field
    pub fn with_bureau_source(mut self, bureau: impl Into<String>) -> Self {
        self.bureau_source = Some(bureau.into());
        self
    }

    /// Set the permissible purpose field
    pub fn with_purpose(mut self, purpose: impl Into<Value>) -> Self {
        self.permissible_purpose = Some(purpose.into());
        self
    }

    /// Parse a draft from a JSON document
    pub fn from_json(json: &str) -> CreditResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| CreditError::validation(format!("Malformed credit data JSON: {e}")))
    }
}

/// A validated credit report snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditReport {
    /// In-range credit score
    pub score: FicoScore,
    /// When the report was produced
    pub report_date: DateTime<Utc>,
    /// Agency the snapshot came from
    pub bureau: Bureau,
    /// Whitelisted access purpose
    pub purpose: String,
}

/// Projected score after removing negative items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreProjection {
    /// Score after the projected improvement, never above the FICO ceiling
    pub potential_score: FicoScore,
    /// Points gained, reflecting any clamping at the ceiling
    pub improvement_points: u16,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bureau_round_trip() {
        for bureau in Bureau::all() {
            assert_eq!(bureau.as_str().parse::<Bureau>().unwrap(), *bureau);
        }
    }

    #[test]
    fn test_bureau_rejects_unknown_agency() {
        let err = "Acme Credit".parse::<Bureau>().unwrap_err();
        assert!(err.to_string().contains("Unknown bureau source"));
    }

    #[test]
    fn test_draft_deserializes_partial_payloads() {
        let draft = CreditReportDraft::from_json(r#"{"score": 720}"#).unwrap();
        assert_eq!(draft.score, Some(json!(720)));
        assert!(draft.report_date.is_none());
        assert!(draft.bureau_source.is_none());
        assert!(draft.permissible_purpose.is_none());
    }

    #[test]
    fn test_draft_keeps_wrong_typed_fields() {
        let draft =
            CreditReportDraft::from_json(r#"{"score": "high", "permissible_purpose": 42}"#)
                .unwrap();
        assert_eq!(draft.score, Some(json!("high")));
        assert_eq!(draft.permissible_purpose, Some(json!(42)));
    }

    #[test]
    fn test_draft_rejects_malformed_json() {
        let err = CreditReportDraft::from_json("{not json").unwrap_err();
        assert!(err.to_string().contains("Malformed credit data JSON"));
    }

    #[test]
    fn test_draft_builder() {
        let draft = CreditReportDraft::new()
            .with_score(695)
            .with_report_date("2026-05-01T00:00:00Z")
            .with_bureau_source("Equifax")
            .with_purpose("account_review");

        assert_eq!(draft.score, Some(json!(695)));
        assert_eq!(draft.bureau_source.as_deref(), Some("Equifax"));
    }
}
