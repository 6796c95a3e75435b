//! Mood entry input
//!
//! Parses stored mood rows as handed over by the storage layer, either as a
//! JSON array or as NDJSON (one row per line). Each row carries a `date` and a
//! `mood` symbol; extra columns such as `id` or `note` are ignored.
//!
//! Dates may be plain calendar dates (`2024-01-15`) or RFC 3339 timestamps
//! (`2024-01-15T00:00:00.000Z`), in which case the date in the timestamp's own
//! offset is used.

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

use crate::error::AnalyticsError;
use crate::types::{MoodEntry, MoodSymbol};

/// A stored row before date normalization
#[derive(Debug, Deserialize)]
struct StoredMoodRow {
    date: String,
    mood: String,
}

impl StoredMoodRow {
    fn into_entry(self) -> Result<MoodEntry, AnalyticsError> {
        Ok(MoodEntry {
            date: parse_entry_date(&self.date)?,
            mood: MoodSymbol::parse(&self.mood),
        })
    }
}

/// Parse a JSON array of mood rows
pub fn parse_array(json: &str) -> Result<Vec<MoodEntry>, AnalyticsError> {
    let rows: Vec<StoredMoodRow> = serde_json::from_str(json)?;
    rows.into_iter().map(StoredMoodRow::into_entry).collect()
}

/// Parse NDJSON (newline-delimited JSON) mood rows
pub fn parse_ndjson(ndjson: &str) -> Result<Vec<MoodEntry>, AnalyticsError> {
    let mut entries = Vec::new();
    for (line_num, line) in ndjson.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let row: StoredMoodRow = serde_json::from_str(trimmed).map_err(|e| {
            AnalyticsError::ParseError(format!("Failed to parse line {}: {}", line_num + 1, e))
        })?;
        let entry = row.into_entry().map_err(|e| {
            AnalyticsError::ParseError(format!("Failed to parse line {}: {}", line_num + 1, e))
        })?;
        entries.push(entry);
    }
    Ok(entries)
}

/// Parse a calendar date or an RFC 3339 timestamp into a date
pub fn parse_entry_date(raw: &str) -> Result<NaiveDate, AnalyticsError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .map_err(|e| AnalyticsError::DateParseError(format!("{raw:?}: {e}")))
}
