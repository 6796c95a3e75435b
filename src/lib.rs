//! Mindful Signals - analytics engine for a mood-journaling application
//!
//! Mindful Signals turns raw user input into the metrics the journal's
//! visualizations consume, through two small deterministic paths:
//!
//! - **HRV**: RR interval text → interval parsing → RMSSD → stress level
//! - **Mood trend**: stored mood entries → mood scoring → ordered score series
//!
//! Every operation is a pure function of its input; nothing here performs I/O
//! or holds shared mutable state.

pub mod chart;
pub mod config;
pub mod encoder;
pub mod entries;
pub mod error;
pub mod hrv;
pub mod intervals;
pub mod mood;
pub mod pipeline;
pub mod series;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use config::{AnalyticsConfig, IntervalPolicy};
pub use error::{AnalyticsError, ValidationError};
pub use hrv::{classify_stress, compute_hrv, compute_rmssd};
pub use intervals::{parse_intervals, IntervalParser};
pub use mood::{MoodScorer, NEUTRAL_SCORE};
pub use pipeline::{hrv_from_text, mood_trend, score_mood, AnalyticsProcessor};
pub use series::{aggregate, is_chronological, SeriesAggregator};
pub use types::{HrvResult, MoodEntry, MoodSymbol, RrIntervals, ScoredMoodEntry, StressLevel};

/// Engine version embedded in all reports
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for reports
pub const PRODUCER_NAME: &str = "mindful-signals";
