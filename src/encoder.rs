//! Report encoding
//!
//! This module wraps analytics results into JSON reports carrying producer
//! metadata, so downstream consumers can tell which engine build produced them.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AnalyticsError;
use crate::series::is_chronological;
use crate::types::{HrvResult, MoodEntry, RrIntervals, ScoredMoodEntry, StressLevel};
use crate::{ENGINE_VERSION, PRODUCER_NAME};

/// Current report schema version
pub const REPORT_VERSION: &str = "1.0.0";

/// Producer metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Producer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// HRV report for a single interval sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HrvReport {
    pub report_version: String,
    pub producer: Producer,
    pub computed_at_utc: String,
    /// Full-precision RMSSD (ms)
    pub rmssd_ms: f64,
    /// RMSSD rounded for display
    pub rmssd_display: String,
    pub stress_level: StressLevel,
    pub stress_label: String,
    pub color: String,
    pub interval_count: usize,
}

/// Mood trend report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    pub report_version: String,
    pub producer: Producer,
    pub computed_at_utc: String,
    pub entries: Vec<ScoredMoodEntry>,
    /// Whether the input honored ascending date order
    pub chronological: bool,
}

/// Encoder for analytics reports
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    fn producer(&self) -> Producer {
        Producer {
            name: PRODUCER_NAME.to_string(),
            version: ENGINE_VERSION.to_string(),
            instance_id: self.instance_id.clone(),
        }
    }

    pub fn encode_hrv(&self, rr: &RrIntervals, result: &HrvResult) -> HrvReport {
        HrvReport {
            report_version: REPORT_VERSION.to_string(),
            producer: self.producer(),
            computed_at_utc: Utc::now().to_rfc3339(),
            rmssd_ms: result.rmssd,
            rmssd_display: result.rmssd_display(),
            stress_level: result.stress_level,
            stress_label: result.stress_level.label().to_string(),
            color: result.stress_level.color_hex().to_string(),
            interval_count: rr.len(),
        }
    }

    pub fn encode_trend(&self, entries: &[MoodEntry], series: Vec<ScoredMoodEntry>) -> TrendReport {
        TrendReport {
            report_version: REPORT_VERSION.to_string(),
            producer: self.producer(),
            computed_at_utc: Utc::now().to_rfc3339(),
            entries: series,
            chronological: is_chronological(entries),
        }
    }

    /// Encode an HRV report to JSON
    pub fn encode_hrv_to_json(
        &self,
        rr: &RrIntervals,
        result: &HrvResult,
    ) -> Result<String, AnalyticsError> {
        let report = self.encode_hrv(rr, result);
        serde_json::to_string_pretty(&report).map_err(AnalyticsError::JsonError)
    }

    /// Encode a trend report to JSON
    pub fn encode_trend_to_json(
        &self,
        entries: &[MoodEntry],
        series: Vec<ScoredMoodEntry>,
    ) -> Result<String, AnalyticsError> {
        let report = self.encode_trend(entries, series);
        serde_json::to_string_pretty(&report).map_err(AnalyticsError::JsonError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hrv::compute_hrv;
    use crate::series::aggregate;
    use chrono::NaiveDate;

    #[test]
    fn test_encode_hrv_report() {
        let encoder = ReportEncoder::with_instance_id("test-instance".to_string());
        let rr = RrIntervals::new(vec![800.0, 810.0, 790.0]).unwrap();
        let result = compute_hrv(&rr);

        let json = encoder.encode_hrv_to_json(&rr, &result).unwrap();
        let payload: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(payload["report_version"], "1.0.0");
        assert_eq!(payload["producer"]["name"], "mindful-signals");
        assert_eq!(payload["producer"]["instance_id"], "test-instance");
        assert_eq!(payload["rmssd_display"], "15.81");
        assert_eq!(payload["stress_level"], "very_high");
        assert_eq!(payload["stress_label"], "Very High Stress");
        assert_eq!(payload["color"], "#D50000");
        assert_eq!(payload["interval_count"], 3);
    }

    #[test]
    fn test_encode_trend_report() {
        let encoder = ReportEncoder::new();
        let entries = vec![
            MoodEntry::new(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), "😀"),
            MoodEntry::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), "😣"),
        ];
        let report = encoder.encode_trend(&entries, aggregate(&entries));

        assert!(!report.chronological);
        assert_eq!(report.entries.len(), 2);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["entries"][0]["date"], "2024-01-02");
        assert_eq!(json["entries"][0]["mood"], "😀");
        assert_eq!(json["entries"][0]["score"], 5);
    }

    #[test]
    fn test_instance_ids_are_unique() {
        let a = ReportEncoder::new();
        let b = ReportEncoder::new();
        assert_ne!(a.producer().instance_id, b.producer().instance_id);
    }
}
