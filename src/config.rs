//! Engine configuration
//!
//! The engine is stateless; configuration only selects how strictly raw
//! interval text is interpreted. It round-trips through JSON so callers can
//! keep it next to their own settings.

use serde::{Deserialize, Serialize};

use crate::error::AnalyticsError;

/// How the interval parser treats tokens that are not positive numbers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalPolicy {
    /// Silently drop unparseable, zero and negative tokens
    #[default]
    Lenient,
    /// Fail on the first unparseable or non-positive token
    Strict,
}

impl IntervalPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalPolicy::Lenient => "lenient",
            IntervalPolicy::Strict => "strict",
        }
    }
}

/// Configuration for an [`AnalyticsProcessor`](crate::pipeline::AnalyticsProcessor)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Interval parsing policy
    pub interval_policy: IntervalPolicy,
}

impl AnalyticsConfig {
    /// Configuration with the strict interval policy
    pub fn strict() -> Self {
        Self {
            interval_policy: IntervalPolicy::Strict,
        }
    }

    /// Load configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, AnalyticsError> {
        serde_json::from_str(json).map_err(|e| AnalyticsError::ConfigError(e.to_string()))
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, AnalyticsError> {
        serde_json::to_string_pretty(self).map_err(|e| AnalyticsError::EncodingError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_is_lenient() {
        assert_eq!(AnalyticsConfig::default().interval_policy, IntervalPolicy::Lenient);
    }

    #[test]
    fn test_from_json_with_missing_fields() {
        let config = AnalyticsConfig::from_json("{}").unwrap();
        assert_eq!(config, AnalyticsConfig::default());
    }

    #[test]
    fn test_config_serialization() {
        let config = AnalyticsConfig::strict();
        let json = config.to_json().unwrap();
        assert!(json.contains("\"strict\""));

        let restored = AnalyticsConfig::from_json(&json).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn test_unknown_policy_is_config_error() {
        let result = AnalyticsConfig::from_json(r#"{"interval_policy": "loose"}"#);
        assert!(matches!(result, Err(AnalyticsError::ConfigError(_))));
    }
}
