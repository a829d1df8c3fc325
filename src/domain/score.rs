//! FICO score value type and qualitative banding
//!
//! Architecture: Value Objects - A score that exists is a score in range
//! - Construction is the single place the 300-850 bound is checked
//! - Both the validators and the rendering layer depend on this type,
//!   so the range rule cannot drift between them

use crate::domain::findings::{CreditError, CreditResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A consumer credit score in the standardized FICO range
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct FicoScore(u16);

impl FicoScore {
    /// Lower bound of the standardized FICO range
    pub const MIN: u16 = 300;
    /// Upper bound of the standardized FICO range
    pub const MAX: u16 = 850;

    /// Create a score, failing for values outside 300-850
    pub fn new(raw: u16) -> CreditResult<Self> {
        if !(Self::MIN..=Self::MAX).contains(&raw) {
            return Err(CreditError::Score { score: f64::from(raw) });
        }
        Ok(Self(raw))
    }

    /// The raw score value
    pub fn get(self) -> u16 {
        self.0
    }

    /// Qualitative band for this score
    pub fn band(self) -> ScoreBand {
        ScoreBand::classify(self.0)
    }
}

impl fmt::Display for FicoScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<u16> for FicoScore {
    type Error = CreditError;

    fn try_from(raw: u16) -> CreditResult<Self> {
        Self::new(raw)
    }
}

impl<'de> Deserialize<'de> for FicoScore {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = u16::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Qualitative score bands used for display and reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl ScoreBand {
    /// Classify a raw in-range score into its band
    pub fn classify(score: u16) -> Self {
        if score >= 740 {
            Self::Excellent
        } else if score >= 670 {
            Self::Good
        } else if score >= 580 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    /// Display label for the band
    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }

    /// Hex color for web consumers of JSON output
    pub fn hex_color(self) -> &'static str {
        match self {
            Self::Excellent => "#22c55e",
            Self::Good => "#3b82f6",
            Self::Fair => "#f59e0b",
            Self::Poor => "#ef4444",
        }
    }

    /// ANSI color code for terminal rendering
    pub fn ansi_color(self) -> &'static str {
        match self {
            Self::Excellent => "32", // Green
            Self::Good => "34",      // Blue
            Self::Fair => "33",      // Yellow
            Self::Poor => "31",      // Red
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(300)]
    #[case(720)]
    #[case(850)]
    fn test_in_range_scores_construct(#[case] raw: u16) {
        let score = FicoScore::new(raw).unwrap();
        assert_eq!(score.get(), raw);
    }

    #[rstest]
    #[case(0)]
    #[case(299)]
    #[case(851)]
    #[case(900)]
    fn test_out_of_range_scores_fail(#[case] raw: u16) {
        let err = FicoScore::new(raw).unwrap_err();
        assert!(err.to_string().contains("Must be between 300-850"));
        assert!(err.to_string().contains(&raw.to_string()));
    }

    #[rstest]
    #[case(300, ScoreBand::Poor)]
    #[case(579, ScoreBand::Poor)]
    #[case(580, ScoreBand::Fair)]
    #[case(669, ScoreBand::Fair)]
    #[case(670, ScoreBand::Good)]
    #[case(739, ScoreBand::Good)]
    #[case(740, ScoreBand::Excellent)]
    #[case(850, ScoreBand::Excellent)]
    fn test_band_thresholds(#[case] raw: u16, #[case] expected: ScoreBand) {
        assert_eq!(FicoScore::new(raw).unwrap().band(), expected);
    }

    #[test]
    fn test_band_labels_and_colors() {
        assert_eq!(ScoreBand::Excellent.label(), "Excellent");
        assert_eq!(ScoreBand::Excellent.hex_color(), "#22c55e");
        assert_eq!(ScoreBand::Good.hex_color(), "#3b82f6");
        assert_eq!(ScoreBand::Fair.hex_color(), "#f59e0b");
        assert_eq!(ScoreBand::Poor.hex_color(), "#ef4444");
    }

    #[test]
    fn test_serde_rejects_out_of_range() {
        let ok: FicoScore = serde_json::from_str("695").unwrap();
        assert_eq!(ok.get(), 695);

        assert!(serde_json::from_str::<FicoScore>("200").is_err());
    }
}
