//! Mood trend aggregation
//!
//! Turns stored mood entries into a parallel sequence of scored points for
//! plotting. Output index `i` always corresponds to input index `i`.
//!
//! # Ordering contract
//!
//! [`SeriesAggregator::aggregate`] neither sorts nor checks its input. Callers
//! must pass entries sorted ascending by date (the storage query is expected to
//! `ORDER BY date ASC`). Out-of-order input produces a trend line that is drawn
//! in the wrong order but never an error. [`is_chronological`] lets a caller
//! verify its side of the contract.

use crate::mood::score_mood;
use crate::types::{MoodEntry, ScoredMoodEntry};

/// Aggregator for mood trend series
pub struct SeriesAggregator;

impl SeriesAggregator {
    /// Score each entry, preserving length and order
    pub fn aggregate(entries: &[MoodEntry]) -> Vec<ScoredMoodEntry> {
        entries
            .iter()
            .map(|entry| ScoredMoodEntry {
                date: entry.date,
                mood: entry.mood.canonical(),
                score: score_mood(&entry.mood),
            })
            .collect()
    }
}

/// Score each entry, preserving length and order
pub fn aggregate(entries: &[MoodEntry]) -> Vec<ScoredMoodEntry> {
    SeriesAggregator::aggregate(entries)
}

/// Whether entries are sorted ascending by date (ties allowed)
pub fn is_chronological(entries: &[MoodEntry]) -> bool {
    entries.windows(2).all(|pair| pair[0].date <= pair[1].date)
}
