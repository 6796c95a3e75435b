//! Core types for the Mindful Signals engine
//!
//! This module defines the values that flow through the two analytics paths:
//! RR intervals into HRV results, and mood entries into scored trend points.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Minimum number of RR intervals needed for any derived metric
pub const MIN_INTERVALS: usize = 2;

/// Ordered RR intervals in milliseconds, in the order they were measured.
///
/// Every value is finite and strictly positive, and there are always at least
/// [`MIN_INTERVALS`] of them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RrIntervals {
    values: Vec<f64>,
}

impl RrIntervals {
    /// Build a sequence from already-numeric intervals
    pub fn new(values: Vec<f64>) -> Result<Self, ValidationError> {
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v <= 0.0)
        {
            return Err(ValidationError::NonPositiveInterval { index, value });
        }

        if values.len() < MIN_INTERVALS {
            return Err(ValidationError::InsufficientIntervals {
                required: MIN_INTERVALS,
                found: values.len(),
            });
        }

        Ok(Self { values })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }
}

impl TryFrom<Vec<f64>> for RrIntervals {
    type Error = ValidationError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

/// Stress bucket derived from RMSSD.
///
/// Variants are declared from highest to lowest RMSSD, so `Ord` follows
/// decreasing heart-rate variability: `VeryLow < Low < ... < VeryHigh`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressLevel {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl StressLevel {
    /// All levels in order of increasing stress
    pub const ALL: [StressLevel; 5] = [
        StressLevel::VeryLow,
        StressLevel::Low,
        StressLevel::Moderate,
        StressLevel::High,
        StressLevel::VeryHigh,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StressLevel::VeryLow => "very_low",
            StressLevel::Low => "low",
            StressLevel::Moderate => "moderate",
            StressLevel::High => "high",
            StressLevel::VeryHigh => "very_high",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            StressLevel::VeryLow => "Very Low Stress",
            StressLevel::Low => "Low Stress",
            StressLevel::Moderate => "Moderate Stress",
            StressLevel::High => "High Stress",
            StressLevel::VeryHigh => "Very High Stress",
        }
    }

    /// Marker shown next to the label
    pub fn emoji(&self) -> &'static str {
        match self {
            StressLevel::VeryLow => "🌿",
            StressLevel::Low => "🙂",
            StressLevel::Moderate => "😐",
            StressLevel::High => "😟",
            StressLevel::VeryHigh => "😣",
        }
    }

    /// Chart color as `#RRGGBB`
    pub fn color_hex(&self) -> &'static str {
        match self {
            StressLevel::VeryLow => "#00C853",
            StressLevel::Low => "#AEEA00",
            StressLevel::Moderate => "#FFD600",
            StressLevel::High => "#FF6D00",
            StressLevel::VeryHigh => "#D50000",
        }
    }
}

/// HRV metric and its stress classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HrvResult {
    /// Root mean square of successive differences (ms), full precision
    pub rmssd: f64,
    /// Stress bucket for `rmssd`
    pub stress_level: StressLevel,
}

impl HrvResult {
    /// RMSSD rounded to two decimals for display
    pub fn rmssd_display(&self) -> String {
        format!("{:.2}", self.rmssd)
    }
}

/// Discrete mood marker logged by a user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoodSymbol {
    #[serde(rename = "😀")]
    Excellent,
    #[serde(rename = "🙂")]
    Good,
    #[serde(rename = "😐")]
    Neutral,
    #[serde(rename = "😟")]
    Low,
    #[serde(rename = "😣")]
    VeryLow,
    /// Anything outside the fixed set, kept verbatim.
    ///
    /// Build values with [`MoodSymbol::parse`] so this never holds one of the
    /// recognized glyphs; [`MoodSymbol::canonical`] repairs values that do.
    #[serde(untagged)]
    Unrecognized(String),
}

impl MoodSymbol {
    /// The recognized symbols from best to worst wellbeing
    pub const RECOGNIZED: [MoodSymbol; 5] = [
        MoodSymbol::Excellent,
        MoodSymbol::Good,
        MoodSymbol::Neutral,
        MoodSymbol::Low,
        MoodSymbol::VeryLow,
    ];

    pub fn parse(raw: &str) -> Self {
        match raw {
            "😀" => MoodSymbol::Excellent,
            "🙂" => MoodSymbol::Good,
            "😐" => MoodSymbol::Neutral,
            "😟" => MoodSymbol::Low,
            "😣" => MoodSymbol::VeryLow,
            other => MoodSymbol::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            MoodSymbol::Excellent => "😀",
            MoodSymbol::Good => "🙂",
            MoodSymbol::Neutral => "😐",
            MoodSymbol::Low => "😟",
            MoodSymbol::VeryLow => "😣",
            MoodSymbol::Unrecognized(raw) => raw.as_str(),
        }
    }

    /// Re-parse an `Unrecognized` value that holds a recognized glyph
    pub fn canonical(&self) -> MoodSymbol {
        MoodSymbol::parse(self.as_str())
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, MoodSymbol::Unrecognized(_))
    }
}

impl From<&str> for MoodSymbol {
    fn from(raw: &str) -> Self {
        MoodSymbol::parse(raw)
    }
}

impl std::fmt::Display for MoodSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored mood log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    /// Calendar date the mood was logged for
    pub date: NaiveDate,
    /// Logged symbol
    pub mood: MoodSymbol,
}

impl MoodEntry {
    pub fn new(date: NaiveDate, mood: impl Into<MoodSymbol>) -> Self {
        Self {
            date,
            mood: mood.into(),
        }
    }
}

/// A mood entry with its ordinal wellbeing score (1-5)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredMoodEntry {
    pub date: NaiveDate,
    pub mood: MoodSymbol,
    pub score: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rr_intervals_requires_two_values() {
        let err = RrIntervals::new(vec![800.0]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InsufficientIntervals {
                required: 2,
                found: 1
            }
        );
        assert!(RrIntervals::new(vec![800.0, 810.0]).is_ok());
    }

    #[test]
    fn test_rr_intervals_rejects_non_positive() {
        let err = RrIntervals::try_from(vec![800.0, 0.0, 790.0]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NonPositiveInterval {
                index: 1,
                value: 0.0
            }
        );
        assert!(RrIntervals::new(vec![800.0, f64::NAN]).is_err());
    }

    #[test]
    fn test_stress_level_order_follows_decreasing_rmssd() {
        assert!(StressLevel::VeryLow < StressLevel::Low);
        assert!(StressLevel::High < StressLevel::VeryHigh);
        let mut sorted = StressLevel::ALL;
        sorted.sort();
        assert_eq!(sorted, StressLevel::ALL);
    }

    #[test]
    fn test_stress_level_serializes_snake_case() {
        let json = serde_json::to_string(&StressLevel::VeryHigh).unwrap();
        assert_eq!(json, "\"very_high\"");
        assert_eq!(StressLevel::VeryHigh.as_str(), "very_high");
    }

    #[test]
    fn test_mood_symbol_serde_keeps_raw_symbol() {
        let known: MoodSymbol = serde_json::from_str("\"🙂\"").unwrap();
        assert_eq!(known, MoodSymbol::Good);
        assert_eq!(serde_json::to_string(&known).unwrap(), "\"🙂\"");

        let unknown: MoodSymbol = serde_json::from_str("\"🤔\"").unwrap();
        assert_eq!(unknown, MoodSymbol::Unrecognized("🤔".to_string()));
        assert_eq!(serde_json::to_string(&unknown).unwrap(), "\"🤔\"");
    }

    #[test]
    fn test_mood_symbol_parse_matches_as_str() {
        for symbol in MoodSymbol::RECOGNIZED {
            assert_eq!(MoodSymbol::parse(symbol.as_str()), symbol);
            assert!(symbol.is_recognized());
        }
        assert!(!MoodSymbol::parse("happy").is_recognized());
    }

    #[test]
    fn test_rmssd_display_rounds_to_two_decimals() {
        let result = HrvResult {
            rmssd: 15.811388,
            stress_level: StressLevel::VeryHigh,
        };
        assert_eq!(result.rmssd_display(), "15.81");
    }
}
