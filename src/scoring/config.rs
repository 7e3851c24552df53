use serde::{Deserialize, Serialize};

use super::normalize::deserialize_lenient;

/// Scoring weights, band bounds and priority thresholds.
///
/// Every field has a default, so a partial document only overrides the keys
/// it names. Values may be written as numbers or numeric strings.
///
/// Example JSON:
/// ```json
/// { "employee_max": 500, "w_growth_signal": 15, "hot_threshold": 75 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Weights {
    /// Lower bound of the ideal employee-count band
    #[serde(deserialize_with = "deserialize_lenient")]
    pub employee_min: f64,

    /// Upper bound of the ideal employee-count band
    #[serde(deserialize_with = "deserialize_lenient")]
    pub employee_max: f64,

    /// Lower bound of the ideal revenue band in USD (preferences may override)
    #[serde(deserialize_with = "deserialize_lenient")]
    pub rev_min: f64,

    /// Upper bound of the ideal revenue band in USD (preferences may override)
    #[serde(deserialize_with = "deserialize_lenient")]
    pub rev_max: f64,

    #[serde(deserialize_with = "deserialize_lenient")]
    pub w_employee_fit: f64,

    #[serde(deserialize_with = "deserialize_lenient")]
    pub w_revenue_fit: f64,

    #[serde(deserialize_with = "deserialize_lenient")]
    pub w_industry_match: f64,

    #[serde(deserialize_with = "deserialize_lenient")]
    pub w_location_match: f64,

    #[serde(deserialize_with = "deserialize_lenient")]
    pub w_contact_completeness: f64,

    #[serde(deserialize_with = "deserialize_lenient")]
    pub w_growth_signal: f64,

    /// Scores at or above this are Hot
    #[serde(deserialize_with = "deserialize_lenient")]
    pub hot_threshold: f64,

    /// Scores at or above this (and below hot) are Warm
    #[serde(deserialize_with = "deserialize_lenient")]
    pub warm_threshold: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            employee_min: 10.0,
            employee_max: 200.0,
            rev_min: 1_000_000.0,
            rev_max: 50_000_000.0,

            // Signal weights sum to 100
            w_employee_fit: 25.0,
            w_revenue_fit: 20.0,
            w_industry_match: 15.0,
            w_location_match: 10.0,
            w_contact_completeness: 20.0,
            w_growth_signal: 10.0,

            hot_threshold: 70.0,
            warm_threshold: 40.0,
        }
    }
}

impl Weights {
    /// Sum of the six signal weights (the best reachable raw score).
    pub fn signal_total(&self) -> f64 {
        self.w_employee_fit
            + self.w_revenue_fit
            + self.w_industry_match
            + self.w_location_match
            + self.w_contact_completeness
            + self.w_growth_signal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = Weights::default();

        assert_eq!(weights.employee_min, 10.0);
        assert_eq!(weights.employee_max, 200.0);
        assert_eq!(weights.rev_min, 1_000_000.0);
        assert_eq!(weights.rev_max, 50_000_000.0);
        assert_eq!(weights.hot_threshold, 70.0);
        assert_eq!(weights.warm_threshold, 40.0);
        assert_eq!(weights.signal_total(), 100.0);
    }

    #[test]
    fn test_weights_json_roundtrip() {
        let weights = Weights::default();
        let json = serde_json::to_string(&weights).unwrap();
        let parsed: Weights = serde_json::from_str(&json).unwrap();
        assert_eq!(weights, parsed);
    }

    #[test]
    fn test_weights_yaml_roundtrip() {
        let weights = Weights::default();
        let yaml = serde_saphyr::to_string(&weights).unwrap();
        let parsed: Weights = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(weights, parsed);
    }

    #[test]
    fn test_partial_weights_keep_defaults() {
        let json = r#"{ "employee_max": 500, "hot_threshold": 80 }"#;
        let weights: Weights = serde_json::from_str(json).unwrap();
        assert_eq!(weights.employee_max, 500.0);
        assert_eq!(weights.hot_threshold, 80.0);
        assert_eq!(weights.employee_min, 10.0);
        assert_eq!(weights.w_employee_fit, 25.0);
    }

    #[test]
    fn test_empty_document_is_default() {
        let weights: Weights = serde_json::from_str("{}").unwrap();
        assert_eq!(weights, Weights::default());
    }

    #[test]
    fn test_numeric_strings_accepted() {
        let json = r#"{ "rev_max": "$20M", "w_growth_signal": "12" }"#;
        let weights: Weights = serde_json::from_str(json).unwrap();
        assert_eq!(weights.rev_max, 20_000_000.0);
        assert_eq!(weights.w_growth_signal, 12.0);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let json = r#"{ "w_bogus": 99, "warm_threshold": 30 }"#;
        let weights: Weights = serde_json::from_str(json).unwrap();
        assert_eq!(weights.warm_threshold, 30.0);
    }

    #[test]
    fn test_partial_yaml_parse() {
        let yaml = r#"
employee_min: 50
w_contact_completeness: 30
"#;
        let weights: Weights = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(weights.employee_min, 50.0);
        assert_eq!(weights.w_contact_completeness, 30.0);
        assert_eq!(weights.employee_max, 200.0);
    }
}
