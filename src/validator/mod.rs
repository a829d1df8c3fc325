//! Validation rules for consumer credit data
//!
//! Architecture: Service Layer - Validators apply policy to untrusted data
//! - Each check is a pure function over the data and the active policy
//! - Checks accumulate findings into a fresh ValidationReport; they never fail
//! - The improvement projection is the one fail-fast operation: without a
//!   valid baseline score it has no meaningful output, so it returns an error

use crate::config::Policy;
use crate::domain::credit::{CreditReportDraft, ScoreProjection};
use crate::domain::findings::{CreditResult, Finding, Severity, ValidationReport};
use crate::domain::score::FicoScore;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde_json::Value;

const SCORE_TYPE_MESSAGE: &str = "Credit score must be a number";
const LOW_SCORE_MESSAGE: &str = "Extremely low credit score - verify data accuracy";
const PURPOSE_REQUIRED_MESSAGE: &str = "Permissible purpose is required per FCRA Section 604";
const PURPOSE_COMPLIANCE_MESSAGE: &str = "Ensure compliance with FCRA Section 604 requirements";

/// Validate a credit score against the standardized FICO range
///
/// Non-finite values are reported the same way as non-numeric input: the
/// range checks only run for real numbers.
pub fn validate_score(score: f64, policy: &Policy) -> ValidationReport {
    let mut report = ValidationReport::new();

    if !score.is_finite() {
        report.add_finding(
            Finding::new("score_type", Severity::Error, SCORE_TYPE_MESSAGE).with_field("score"),
        );
    } else if score < f64::from(FicoScore::MIN) || score > f64::from(FicoScore::MAX) {
        report.add_finding(
            Finding::new(
                "score_range",
                Severity::Error,
                format!(
                    "Invalid FICO score: {score}. Must be between {}-{}.",
                    FicoScore::MIN,
                    FicoScore::MAX
                ),
            )
            .with_field("score"),
        );
    } else if score < f64::from(policy.advisory.low_score_floor) {
        report.add_finding(
            Finding::new("score_advisory", Severity::Warning, LOW_SCORE_MESSAGE)
                .with_field("score"),
        );
    }

    report
}

/// Validate a credit score supplied as a raw JSON value
///
/// Anything that is not a number yields a type error and no further checks.
pub fn validate_score_value(value: &Value, policy: &Policy) -> ValidationReport {
    match value.as_f64() {
        Some(score) => validate_score(score, policy),
        None => {
            let mut report = ValidationReport::new();
            report.add_finding(
                Finding::new("score_type", Severity::Error, SCORE_TYPE_MESSAGE)
                    .with_field("score"),
            );
            report
        }
    }
}

/// Validate a declared purpose against the policy whitelist
pub fn validate_purpose(purpose: &str, policy: &Policy) -> ValidationReport {
    let mut report = ValidationReport::new();

    if purpose.is_empty() {
        report.add_finding(
            Finding::new("purpose_required", Severity::Error, PURPOSE_REQUIRED_MESSAGE)
                .with_field("permissible_purpose"),
        );
    } else if !policy.is_permitted_purpose(purpose) {
        report.add_finding(
            Finding::new(
                "purpose_whitelist",
                Severity::Error,
                format!("Invalid permissible purpose: {purpose}"),
            )
            .with_field("permissible_purpose"),
        );
        report.add_finding(
            Finding::new("purpose_compliance", Severity::Warning, PURPOSE_COMPLIANCE_MESSAGE)
                .with_field("permissible_purpose"),
        );
    }

    report
}

/// Validate a declared purpose supplied as a raw JSON value
///
/// Missing, null, and non-string values all count as an absent purpose.
pub fn validate_purpose_value(value: &Value, policy: &Policy) -> ValidationReport {
    match value.as_str() {
        Some(purpose) => validate_purpose(purpose, policy),
        None => {
            let mut report = ValidationReport::new();
            report.add_finding(
                Finding::new("purpose_required", Severity::Error, PURPOSE_REQUIRED_MESSAGE)
                    .with_field("permissible_purpose"),
            );
            report
        }
    }
}

/// Validate a complete credit report draft against the current time
pub fn validate_draft(draft: &CreditReportDraft, policy: &Policy) -> ValidationReport {
    validate_draft_at(draft, policy, Utc::now())
}

/// Validate a complete credit report draft against an explicit clock
///
/// Four independent checks; their findings are concatenated in check order
/// and each check's internal ordering is preserved. Staleness never
/// invalidates a draft.
pub fn validate_draft_at(
    draft: &CreditReportDraft,
    policy: &Policy,
    now: DateTime<Utc>,
) -> ValidationReport {
    tracing::debug!("validating credit report draft");
    let mut report = ValidationReport::new();

    match &draft.score {
        None | Some(Value::Null) => {
            report.add_finding(
                Finding::new("score_required", Severity::Error, "Credit score is required")
                    .with_field("score"),
            );
        }
        Some(value) => report.merge(validate_score_value(value, policy)),
    }

    match &draft.permissible_purpose {
        None | Some(Value::Null) => {
            report.add_finding(
                Finding::new(
                    "purpose_required",
                    Severity::Error,
                    "Permissible purpose is required",
                )
                .with_field("permissible_purpose"),
            );
        }
        Some(Value::String(s)) if s.is_empty() => {
            report.add_finding(
                Finding::new(
                    "purpose_required",
                    Severity::Error,
                    "Permissible purpose is required",
                )
                .with_field("permissible_purpose"),
            );
        }
        Some(value) => report.merge(validate_purpose_value(value, policy)),
    }

    match draft.report_date.as_deref() {
        None | Some("") => {
            report.add_finding(
                Finding::new("report_date_required", Severity::Error, "Report date is required")
                    .with_field("report_date"),
            );
        }
        Some(raw) => match parse_report_date(raw) {
            Some(report_date) => {
                let max_age = Duration::days(policy.freshness.max_report_age_days);
                if now.signed_duration_since(report_date) > max_age {
                    report.add_finding(
                        Finding::new(
                            "report_staleness",
                            Severity::Warning,
                            format!(
                                "Credit report is older than {} days - consider refreshing",
                                policy.freshness.max_report_age_days
                            ),
                        )
                        .with_field("report_date"),
                    );
                }
            }
            None => {
                tracing::warn!(report_date = raw, "unparseable report date");
                report.add_finding(
                    Finding::new(
                        "report_date_format",
                        Severity::Error,
                        format!("Invalid report date: {raw}. Expected an ISO-8601 date-time."),
                    )
                    .with_field("report_date"),
                );
            }
        },
    }

    match draft.bureau_source.as_deref() {
        None | Some("") => {
            report.add_finding(
                Finding::new("bureau_required", Severity::Error, "Bureau source is required")
                    .with_field("bureau_source"),
            );
        }
        // Presence only. The three-agency enumeration is enforced when a
        // draft is resolved into a typed report, not here.
        Some(_) => {}
    }

    report
}

/// Parse an ISO-8601 date-time, accepting bare dates at midnight UTC
pub(crate) fn parse_report_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Project the score improvement from removing negative items
///
/// Fails fast when the current score is outside the FICO range; the
/// projection has no meaningful output without a valid baseline.
pub fn project_improvement(
    current: u16,
    negative_items: u32,
    policy: &Policy,
) -> CreditResult<ScoreProjection> {
    let baseline = FicoScore::new(current)?;

    let raw_points =
        u64::from(negative_items) * u64::from(policy.improvement.points_per_item);
    let capped = raw_points.min(u64::from(policy.improvement.max_total_points)) as u32;

    let potential_raw =
        (u32::from(baseline.get()) + capped).min(u32::from(FicoScore::MAX)) as u16;
    let potential = FicoScore::new(potential_raw)?;

    tracing::debug!(
        current,
        negative_items,
        potential = potential.get(),
        "projected score improvement"
    );

    Ok(ScoreProjection {
        potential_score: potential,
        improvement_points: potential.get() - baseline.get(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::json;

    fn policy() -> Policy {
        Policy::default()
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap()
    }

    #[rstest]
    #[case(300.0)]
    #[case(350.0)]
    #[case(720.0)]
    #[case(850.0)]
    fn test_in_range_scores_are_valid(#[case] score: f64) {
        let report = validate_score(score, &policy());
        assert!(report.is_valid());
    }

    #[rstest]
    #[case(299.0)]
    #[case(851.0)]
    #[case(900.0)]
    #[case(-5.0)]
    fn test_out_of_range_scores_report_bounds(#[case] score: f64) {
        let report = validate_score(score, &policy());
        assert!(!report.is_valid());

        let errors: Vec<_> = report.errors().collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains(&format!("{score}")));
        assert!(errors[0].contains("300-850"));
    }

    #[test]
    fn test_range_error_message_exact() {
        let report = validate_score(900.0, &policy());
        assert_eq!(
            report.errors().collect::<Vec<_>>(),
            vec!["Invalid FICO score: 900. Must be between 300-850."]
        );
    }

    #[rstest]
    #[case(300.0)]
    #[case(320.0)]
    #[case(349.0)]
    fn test_extremely_low_scores_warn_but_stay_valid(#[case] score: f64) {
        let report = validate_score(score, &policy());
        assert!(report.is_valid());
        assert_eq!(
            report.warnings().collect::<Vec<_>>(),
            vec!["Extremely low credit score - verify data accuracy"]
        );
    }

    #[test]
    fn test_floor_boundary_has_no_warning() {
        let report = validate_score(350.0, &policy());
        assert!(report.is_valid());
        assert!(!report.has_warnings());
    }

    #[rstest]
    #[case(json!("invalid"))]
    #[case(json!(true))]
    #[case(json!(null))]
    #[case(json!([720]))]
    fn test_non_numeric_score_values(#[case] value: Value) {
        let report = validate_score_value(&value, &policy());
        let errors: Vec<_> = report.errors().collect();
        assert_eq!(errors, vec!["Credit score must be a number"]);
    }

    #[test]
    fn test_non_finite_score_is_a_type_error() {
        let report = validate_score(f64::NAN, &policy());
        assert_eq!(report.errors().collect::<Vec<_>>(), vec!["Credit score must be a number"]);
    }

    #[rstest]
    #[case("credit_application")]
    #[case("account_review")]
    #[case("collection_activity")]
    #[case("employment_screening")]
    #[case("insurance_underwriting")]
    #[case("tenant_screening")]
    #[case("legitimate_business_need")]
    fn test_whitelisted_purposes_are_valid(#[case] purpose: &str) {
        let report = validate_purpose(purpose, &policy());
        assert!(report.is_valid());
        assert!(!report.has_findings());
    }

    #[rstest]
    #[case("curiosity")]
    #[case("marketing")]
    #[case("personal_interest")]
    #[case("unauthorized_access")]
    fn test_off_list_purposes_error_and_warn(#[case] purpose: &str) {
        let report = validate_purpose(purpose, &policy());
        assert!(!report.is_valid());

        let errors: Vec<_> = report.errors().collect();
        assert_eq!(errors, vec![format!("Invalid permissible purpose: {purpose}")]);

        let warnings: Vec<_> = report.warnings().collect();
        assert_eq!(warnings, vec!["Ensure compliance with FCRA Section 604 requirements"]);
    }

    #[test]
    fn test_empty_purpose_is_required_error_only() {
        let report = validate_purpose("", &policy());
        assert!(!report.is_valid());
        assert_eq!(
            report.errors().collect::<Vec<_>>(),
            vec!["Permissible purpose is required per FCRA Section 604"]
        );
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_non_string_purpose_value_is_required_error() {
        let report = validate_purpose_value(&json!(42), &policy());
        assert_eq!(
            report.errors().collect::<Vec<_>>(),
            vec!["Permissible purpose is required per FCRA Section 604"]
        );
    }

    #[test]
    fn test_complete_valid_draft() {
        let draft = CreditReportDraft::new()
            .with_score(720)
            .with_report_date("2026-06-01T00:00:00Z")
            .with_bureau_source("Experian")
            .with_purpose("credit_application");

        let report = validate_draft_at(&draft, &policy(), fixed_now());
        assert!(report.is_valid());
        assert!(!report.has_findings());
    }

    #[test]
    fn test_empty_draft_reports_all_required_fields() {
        let report = validate_draft_at(&CreditReportDraft::new(), &policy(), fixed_now());
        let errors: Vec<_> = report.errors().collect();
        assert_eq!(
            errors,
            vec![
                "Credit score is required",
                "Permissible purpose is required",
                "Report date is required",
                "Bureau source is required",
            ]
        );
    }

    #[test]
    fn test_draft_with_multiple_problems() {
        let draft = CreditReportDraft::new()
            .with_score(900)
            .with_report_date("")
            .with_purpose("invalid_purpose");

        let report = validate_draft_at(&draft, &policy(), fixed_now());
        assert!(!report.is_valid());
        assert!(report.errors().count() > 1);

        let errors: Vec<_> = report.errors().collect();
        assert!(errors.contains(&"Invalid FICO score: 900. Must be between 300-850."));
        assert!(errors.contains(&"Invalid permissible purpose: invalid_purpose"));
        assert!(errors.contains(&"Report date is required"));
        assert!(errors.contains(&"Bureau source is required"));
    }

    #[test]
    fn test_old_report_warns_but_stays_valid() {
        let hundred_days_ago = fixed_now() - Duration::days(100);
        let draft = CreditReportDraft::new()
            .with_score(720)
            .with_report_date(hundred_days_ago.to_rfc3339())
            .with_bureau_source("Experian")
            .with_purpose("credit_application");

        let report = validate_draft_at(&draft, &policy(), fixed_now());
        assert!(report.is_valid());
        assert_eq!(
            report.warnings().collect::<Vec<_>>(),
            vec!["Credit report is older than 90 days - consider refreshing"]
        );
    }

    #[test]
    fn test_report_exactly_at_window_is_fresh() {
        let ninety_days_ago = fixed_now() - Duration::days(90);
        let draft = CreditReportDraft::new()
            .with_score(720)
            .with_report_date(ninety_days_ago.to_rfc3339())
            .with_bureau_source("Equifax")
            .with_purpose("account_review");

        let report = validate_draft_at(&draft, &policy(), fixed_now());
        assert!(report.is_valid());
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_future_report_date_is_fresh() {
        let tomorrow = fixed_now() + Duration::days(1);
        let draft = CreditReportDraft::new()
            .with_score(720)
            .with_report_date(tomorrow.to_rfc3339())
            .with_bureau_source("TransUnion")
            .with_purpose("account_review");

        let report = validate_draft_at(&draft, &policy(), fixed_now());
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_bare_date_is_accepted() {
        let draft = CreditReportDraft::new()
            .with_score(720)
            .with_report_date("2026-06-01")
            .with_bureau_source("Experian")
            .with_purpose("credit_application");

        let report = validate_draft_at(&draft, &policy(), fixed_now());
        assert!(report.is_valid());
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_garbage_report_date_is_an_error() {
        let draft = CreditReportDraft::new()
            .with_score(720)
            .with_report_date("not-a-date")
            .with_bureau_source("Experian")
            .with_purpose("credit_application");

        let report = validate_draft_at(&draft, &policy(), fixed_now());
        assert!(!report.is_valid());
        let errors: Vec<_> = report.errors().collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("not-a-date"));
    }

    #[test]
    fn test_null_score_counts_as_missing() {
        let draft = CreditReportDraft::new()
            .with_score(json!(null))
            .with_report_date("2026-06-01T00:00:00Z")
            .with_bureau_source("Experian")
            .with_purpose("credit_application");

        let report = validate_draft_at(&draft, &policy(), fixed_now());
        assert_eq!(report.errors().collect::<Vec<_>>(), vec!["Credit score is required"]);
    }

    #[test]
    fn test_validators_are_idempotent() {
        let draft = CreditReportDraft::new()
            .with_score(320)
            .with_report_date("2026-01-01T00:00:00Z")
            .with_purpose("marketing");
        let now = fixed_now();

        assert_eq!(
            validate_draft_at(&draft, &policy(), now),
            validate_draft_at(&draft, &policy(), now)
        );
        assert_eq!(validate_score(320.0, &policy()), validate_score(320.0, &policy()));
        assert_eq!(
            validate_purpose("marketing", &policy()),
            validate_purpose("marketing", &policy())
        );
    }

    #[test]
    fn test_projection_basic() {
        let projection = project_improvement(620, 3, &policy()).unwrap();
        assert_eq!(projection.improvement_points, 75);
        assert_eq!(projection.potential_score.get(), 695);
    }

    #[test]
    fn test_projection_clamped_at_ceiling() {
        let projection = project_improvement(800, 10, &policy()).unwrap();
        assert_eq!(projection.potential_score.get(), 850);
        assert_eq!(projection.improvement_points, 50);
    }

    #[test]
    fn test_projection_total_cap() {
        // 100 items would be 2500 raw points; the policy caps at 200.
        let projection = project_improvement(300, 100, &policy()).unwrap();
        assert_eq!(projection.potential_score.get(), 500);
        assert_eq!(projection.improvement_points, 200);
    }

    #[test]
    fn test_projection_zero_items() {
        let projection = project_improvement(720, 0, &policy()).unwrap();
        assert_eq!(projection.potential_score.get(), 720);
        assert_eq!(projection.improvement_points, 0);
    }

    #[test]
    fn test_projection_rejects_invalid_baseline() {
        let err = project_improvement(900, 3, &policy()).unwrap_err();
        assert!(err.to_string().contains("Invalid FICO score: 900"));

        assert!(project_improvement(299, 1, &policy()).is_err());
    }

    #[test]
    fn test_projection_respects_custom_policy() {
        let custom = crate::config::PolicyBuilder::new().improvement(10, 30).build().unwrap();
        let projection = project_improvement(600, 5, &custom).unwrap();
        assert_eq!(projection.improvement_points, 30);
        assert_eq!(projection.potential_score.get(), 630);
    }
}
