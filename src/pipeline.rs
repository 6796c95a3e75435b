//! Analytics entry points
//!
//! This module provides the public API for Mindful Signals. It composes the
//! interval parser, HRV engine, mood scorer and series aggregator into the two
//! use cases the application needs: HRV from user input, and a mood trend
//! series from stored entries.

use tracing::debug;

use crate::config::AnalyticsConfig;
use crate::encoder::ReportEncoder;
use crate::error::{AnalyticsError, ValidationError};
use crate::hrv::compute_hrv;
use crate::intervals::IntervalParser;
use crate::mood::score_mood_str;
use crate::series::aggregate;
use crate::types::{HrvResult, MoodEntry, RrIntervals, ScoredMoodEntry};

/// Compute HRV from comma-separated RR interval text.
///
/// Parsing uses the lenient policy; a parse failure short-circuits.
///
/// # Example
/// ```
/// use mindful_signals::{hrv_from_text, StressLevel};
///
/// let result = hrv_from_text("800, 810, 790").unwrap();
/// assert_eq!(result.stress_level, StressLevel::VeryHigh);
/// assert_eq!(result.rmssd_display(), "15.81");
/// ```
pub fn hrv_from_text(raw: &str) -> Result<HrvResult, ValidationError> {
    let rr = IntervalParser::default().parse(raw)?;
    Ok(compute_hrv(&rr))
}

/// Build the scored mood trend series.
///
/// `entries` must already be sorted ascending by date; see
/// [`crate::series`] for the ordering contract.
pub fn mood_trend(entries: &[MoodEntry]) -> Vec<ScoredMoodEntry> {
    aggregate(entries)
}

/// Score a single raw mood symbol (1-5, unknown symbols score 3)
pub fn score_mood(symbol: &str) -> u8 {
    score_mood_str(symbol)
}

/// Configured entry point that also produces JSON reports.
///
/// Holds no mutable state and can be shared freely between threads.
pub struct AnalyticsProcessor {
    config: AnalyticsConfig,
    parser: IntervalParser,
    encoder: ReportEncoder,
}

impl Default for AnalyticsProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyticsProcessor {
    /// Create a new processor with default settings
    pub fn new() -> Self {
        Self::with_config(AnalyticsConfig::default())
    }

    /// Create a processor with a specific configuration
    pub fn with_config(config: AnalyticsConfig) -> Self {
        Self {
            parser: IntervalParser::new(config.interval_policy),
            config,
            encoder: ReportEncoder::new(),
        }
    }

    /// Load configuration from JSON
    pub fn from_config_json(json: &str) -> Result<Self, AnalyticsError> {
        Ok(Self::with_config(AnalyticsConfig::from_json(json)?))
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Parse interval text with the configured policy
    pub fn parse_intervals(&self, raw: &str) -> Result<RrIntervals, ValidationError> {
        self.parser.parse(raw)
    }

    /// Compute HRV from interval text with the configured policy
    pub fn hrv_from_text(&self, raw: &str) -> Result<HrvResult, ValidationError> {
        let rr = self.parse_intervals(raw)?;
        Ok(compute_hrv(&rr))
    }

    pub fn mood_trend(&self, entries: &[MoodEntry]) -> Vec<ScoredMoodEntry> {
        mood_trend(entries)
    }

    /// Compute HRV and encode it as a JSON report
    pub fn hrv_report_json(&self, raw: &str) -> Result<String, AnalyticsError> {
        let rr = self.parse_intervals(raw)?;
        let result = compute_hrv(&rr);
        self.encoder.encode_hrv_to_json(&rr, &result)
    }

    /// Build the mood trend and encode it as a JSON report
    pub fn trend_report_json(&self, entries: &[MoodEntry]) -> Result<String, AnalyticsError> {
        let series = mood_trend(entries);
        debug!(entries = series.len(), "built mood trend");
        self.encoder.encode_trend_to_json(entries, series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IntervalPolicy;
    use crate::types::StressLevel;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn sorted_entries() -> Vec<MoodEntry> {
        ["😀", "🙂", "😐", "😟", "😣", "🤷"]
            .iter()
            .enumerate()
            .map(|(i, symbol)| {
                let date = NaiveDate::from_ymd_opt(2024, 2, 1 + i as u32).unwrap();
                MoodEntry::new(date, *symbol)
            })
            .collect()
    }

    #[test]
    fn test_hrv_from_text_worked_example() {
        let result = hrv_from_text("800,810,790").unwrap();
        assert!((result.rmssd - 15.8114).abs() < 1e-4);
        assert_eq!(result.stress_level, StressLevel::VeryHigh);
    }

    #[test]
    fn test_hrv_from_text_short_input_fails() {
        let err = hrv_from_text("800").unwrap_err();
        assert_eq!(err.reason(), "insufficient intervals");
    }

    #[test]
    fn test_hrv_from_text_constant_sequence() {
        let result = hrv_from_text("1000, 1000, 1000").unwrap();
        assert_eq!(result.rmssd, 0.0);
        assert_eq!(result.stress_level, StressLevel::VeryHigh);
    }

    #[test]
    fn test_mood_trend_matches_score_mood() {
        let entries = sorted_entries();
        let trend = mood_trend(&entries);

        let scores: Vec<u8> = trend.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![5, 4, 3, 2, 1, 3]);
        for (entry, point) in entries.iter().zip(&trend) {
            assert_eq!(point.score, score_mood(entry.mood.as_str()));
        }
        assert!(mood_trend(&[]).is_empty());
    }

    #[test]
    fn test_processor_strict_policy() {
        let processor = AnalyticsProcessor::with_config(AnalyticsConfig::strict());
        assert_eq!(processor.config().interval_policy, IntervalPolicy::Strict);

        let err = processor.hrv_from_text("800, 0, 810").unwrap_err();
        assert_eq!(err.reason(), "non-positive interval");

        // The free function stays lenient
        assert!(hrv_from_text("800, 0, 810").is_ok());
    }

    #[test]
    fn test_processor_from_config_json() {
        let processor =
            AnalyticsProcessor::from_config_json(r#"{"interval_policy": "strict"}"#).unwrap();
        assert!(processor.hrv_from_text("800, x, 810").is_err());

        assert!(AnalyticsProcessor::from_config_json("[").is_err());
    }

    #[test]
    fn test_hrv_report_json() {
        let processor = AnalyticsProcessor::new();
        let json = processor.hrv_report_json("700, 800").unwrap();
        let payload: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(payload["stress_level"], "very_low");
        assert_eq!(payload["rmssd_ms"], 100.0);
        assert_eq!(payload["interval_count"], 2);
    }

    #[test]
    fn test_hrv_report_json_propagates_validation() {
        let processor = AnalyticsProcessor::new();
        let err = processor.hrv_report_json("abc").unwrap_err();
        assert!(matches!(err, AnalyticsError::Validation(_)));
    }

    #[test]
    fn test_trend_report_json() {
        let processor = AnalyticsProcessor::new();
        let json = processor.trend_report_json(&sorted_entries()).unwrap();
        let payload: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(payload["chronological"], true);
        assert_eq!(payload["entries"].as_array().unwrap().len(), 6);
        assert_eq!(payload["entries"][5]["mood"], "🤷");
        assert_eq!(payload["entries"][5]["score"], 3);
    }

    #[test]
    fn test_processor_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AnalyticsProcessor>();
        assert_send_sync::<HrvResult>();
        assert_send_sync::<ScoredMoodEntry>();
    }
}
