//! Chart support for the two visualizations
//!
//! The engine does not render anything. It hands consumers ready-to-plot
//! datasets, and [`RenderSlot`] gives them a scoped home for whatever render
//! resource their charting library hands back.

use chrono::NaiveDate;
use serde::Serialize;

use crate::mood::{MAX_SCORE, MIN_SCORE};
use crate::types::{HrvResult, MoodSymbol, RrIntervals, ScoredMoodEntry};

/// Line dataset of the RR intervals behind an HRV result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RrChart {
    /// One label per beat: `Beat 1`, `Beat 2`, ...
    pub labels: Vec<String>,
    /// Interval values (ms)
    pub values: Vec<f64>,
    /// Series color taken from the stress level
    pub color: &'static str,
    pub series_label: &'static str,
}

impl RrChart {
    pub fn new(rr: &RrIntervals, result: &HrvResult) -> Self {
        Self {
            labels: (1..=rr.len()).map(|i| format!("Beat {i}")).collect(),
            values: rr.as_slice().to_vec(),
            color: result.stress_level.color_hex(),
            series_label: "RR Intervals (ms)",
        }
    }
}

/// Point of the mood trend line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodPoint {
    pub date: NaiveDate,
    pub score: u8,
    /// Symbol shown in the tooltip
    pub symbol: String,
}

/// Mood trend line with a fixed 1-5 axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodChart {
    pub points: Vec<MoodPoint>,
    pub y_domain: (u8, u8),
}

impl MoodChart {
    pub fn new(series: &[ScoredMoodEntry]) -> Self {
        Self {
            points: series
                .iter()
                .map(|entry| MoodPoint {
                    date: entry.date,
                    score: entry.score,
                    symbol: entry.mood.as_str().to_string(),
                })
                .collect(),
            y_domain: (MIN_SCORE, MAX_SCORE),
        }
    }

    /// Tick label for a score on the y axis
    pub fn tick_label(score: u8) -> Option<String> {
        MoodSymbol::from_score(score).map(|symbol| symbol.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Holder for at most one live render resource.
///
/// Each computation acquires a fresh resource through [`RenderSlot::acquire`].
/// The previous resource is dropped before the new one is built, and the
/// current one is dropped with the slot, so stale render state never stacks up
/// regardless of how the caller exits.
#[derive(Debug)]
pub struct RenderSlot<H> {
    current: Option<H>,
}

impl<H> Default for RenderSlot<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> RenderSlot<H> {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Release the current resource, then build and store a new one
    pub fn acquire<F>(&mut self, build: F) -> &mut H
    where
        F: FnOnce() -> H,
    {
        self.release();
        self.current.insert(build())
    }

    /// Release the current resource, then try to build a new one.
    ///
    /// On failure the slot is left empty.
    pub fn try_acquire<F, E>(&mut self, build: F) -> Result<&mut H, E>
    where
        F: FnOnce() -> Result<H, E>,
    {
        self.release();
        Ok(self.current.insert(build()?))
    }

    /// Drop the current resource, if any
    pub fn release(&mut self) {
        self.current = None;
    }

    pub fn get(&self) -> Option<&H> {
        self.current.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }
}
