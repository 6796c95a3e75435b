//! RR interval parsing
//!
//! Turns user-entered text such as `"800, 810, 790"` into [`RrIntervals`].
//! Tokens are comma separated and whitespace around each token is ignored.

use tracing::debug;

use crate::config::IntervalPolicy;
use crate::error::ValidationError;
use crate::types::{RrIntervals, MIN_INTERVALS};

/// Parser for comma-separated RR interval text
#[derive(Debug, Clone, Copy, Default)]
pub struct IntervalParser {
    policy: IntervalPolicy,
}

impl IntervalParser {
    pub fn new(policy: IntervalPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> IntervalPolicy {
        self.policy
    }

    /// Parse raw text into an interval sequence
    pub fn parse(&self, raw: &str) -> Result<RrIntervals, ValidationError> {
        let values = match self.policy {
            IntervalPolicy::Lenient => parse_lenient(raw),
            IntervalPolicy::Strict => parse_strict(raw)?,
        };

        if values.len() < MIN_INTERVALS {
            return Err(ValidationError::InsufficientIntervals {
                required: MIN_INTERVALS,
                found: values.len(),
            });
        }

        RrIntervals::new(values)
    }
}

/// Parse with the default lenient policy
pub fn parse_intervals(raw: &str) -> Result<RrIntervals, ValidationError> {
    IntervalParser::default().parse(raw)
}

/// Keep only tokens that convert to a finite, positive number
fn parse_lenient(raw: &str) -> Vec<f64> {
    let mut discarded = 0usize;
    let values: Vec<f64> = raw
        .split(',')
        .filter_map(|token| match parse_token(token) {
            Some(value) if value > 0.0 => Some(value),
            _ => {
                discarded += 1;
                None
            }
        })
        .collect();

    if discarded > 0 {
        debug!(discarded, kept = values.len(), "dropped invalid interval tokens");
    }

    values
}

/// Reject the first unparseable or non-positive token
fn parse_strict(raw: &str) -> Result<Vec<f64>, ValidationError> {
    let mut values = Vec::new();

    for (index, token) in raw.split(',').enumerate() {
        let trimmed = token.trim();
        // Trailing commas and blank input are not measurements
        if trimmed.is_empty() {
            continue;
        }

        let value = parse_token(trimmed).ok_or_else(|| ValidationError::InvalidToken {
            index,
            token: trimmed.to_string(),
        })?;

        if value <= 0.0 {
            return Err(ValidationError::NonPositiveInterval { index, value });
        }

        values.push(value);
    }

    Ok(values)
}

fn parse_token(token: &str) -> Option<f64> {
    token
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_trims_whitespace() {
        let rr = parse_intervals(" 800 ,810,  790 ").unwrap();
        assert_eq!(rr.as_slice(), &[800.0, 810.0, 790.0]);
    }

    #[test]
    fn test_lenient_drops_invalid_and_zero_tokens() {
        let rr = parse_intervals("800, abc, 0, , 810, -5, 790").unwrap();
        assert_eq!(rr.as_slice(), &[800.0, 810.0, 790.0]);
    }

    #[test]
    fn test_lenient_drops_negative_values() {
        let rr = parse_intervals("800, -10, 810").unwrap();
        assert_eq!(rr.as_slice(), &[800.0, 810.0]);

        let result = crate::hrv::compute_hrv(&rr);
        assert!((result.rmssd - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_lenient_accepts_decimals_and_exponents() {
        let rr = parse_intervals("812.5, 8.1e2").unwrap();
        assert_eq!(rr.as_slice(), &[812.5, 810.0]);
    }

    #[test]
    fn test_lenient_drops_non_finite_values() {
        let err = parse_intervals("800, inf, NaN").unwrap_err();
        assert_eq!(err.reason(), "insufficient intervals");
    }

    #[test]
    fn test_insufficient_intervals() {
        for raw in ["", "800", "800, abc", "0, 0, 0", ",,,"] {
            let err = parse_intervals(raw).unwrap_err();
            assert_eq!(err.reason(), "insufficient intervals", "input {raw:?}");
        }
    }

    #[test]
    fn test_strict_rejects_invalid_token() {
        let parser = IntervalParser::new(IntervalPolicy::Strict);
        let err = parser.parse("800,abc,810").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidToken {
                index: 1,
                token: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_strict_rejects_zero_interval() {
        let parser = IntervalParser::new(IntervalPolicy::Strict);
        let err = parser.parse("800, 0, 810").unwrap_err();
        assert_eq!(
            err,
            ValidationError::NonPositiveInterval {
                index: 1,
                value: 0.0
            }
        );
        assert_eq!(err.reason(), "non-positive interval");
    }

    #[test]
    fn test_strict_skips_blank_tokens() {
        let parser = IntervalParser::new(IntervalPolicy::Strict);
        let rr = parser.parse("800, 810,").unwrap();
        assert_eq!(rr.len(), 2);

        let err = parser.parse("").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InsufficientIntervals {
                required: 2,
                found: 0
            }
        );
    }
}
