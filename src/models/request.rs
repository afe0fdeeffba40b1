//! Progression request model.
//!
//! A request carries the raw campaign parameters as collected from the
//! caller. Integers stay signed so that invalid input can be reported
//! instead of wrapping; see [`crate::validation`].

use serde::{Deserialize, Serialize};

use super::FormulaType;
use crate::error::PlanError;

/// Input for plan generation.
///
/// # Example
///
/// ```
/// use u_warmup::models::{FormulaType, ProgressionRequest};
///
/// let request = ProgressionRequest::new(500, 20, FormulaType::Geometric).with_ratio(1.2);
/// assert_eq!(request.ratio, Some(1.2));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionRequest {
    /// Total number of contacts to email over the campaign.
    pub total_emails: i64,
    /// Campaign duration in days.
    pub days: i64,
    /// Progression shape.
    #[serde(default)]
    pub formula: FormulaType,
    /// Day-over-day ratio (geometric only).
    #[serde(default)]
    pub ratio: Option<f64>,
    /// First-day volume (arithmetic custom mode).
    #[serde(default)]
    pub starting_baseline: Option<i64>,
    /// Daily volume increment (arithmetic custom mode).
    #[serde(default)]
    pub increase_per_day: Option<i64>,
    /// Target first-step growth rate (geometric_alpha only).
    #[serde(default)]
    pub alpha: Option<f64>,
}

impl ProgressionRequest {
    /// Creates a request with no optional tuning parameters.
    pub fn new(total_emails: i64, days: i64, formula: FormulaType) -> Self {
        Self {
            total_emails,
            days,
            formula,
            ratio: None,
            starting_baseline: None,
            increase_per_day: None,
            alpha: None,
        }
    }

    /// Sets the geometric ratio.
    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.ratio = Some(ratio);
        self
    }

    /// Sets an optional geometric ratio.
    pub fn with_ratio_opt(mut self, ratio: Option<f64>) -> Self {
        self.ratio = ratio;
        self
    }

    /// Sets the arithmetic custom-mode baseline and increment.
    pub fn with_custom_ramp(mut self, starting_baseline: i64, increase_per_day: i64) -> Self {
        self.starting_baseline = Some(starting_baseline);
        self.increase_per_day = Some(increase_per_day);
        self
    }

    /// Sets the geometric_alpha target growth rate.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    /// Baseline and increment, when both are present.
    pub fn custom_ramp(&self) -> Option<(i64, i64)> {
        self.starting_baseline.zip(self.increase_per_day)
    }

    /// Parses a request from a campaign record's JSON.
    pub fn from_json(json: &str) -> Result<Self, PlanError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = ProgressionRequest::new(1000, 30, FormulaType::Arithmetic)
            .with_custom_ramp(20, 5)
            .with_alpha(0.2);

        assert_eq!(request.total_emails, 1000);
        assert_eq!(request.days, 30);
        assert_eq!(request.custom_ramp(), Some((20, 5)));
        assert_eq!(request.alpha, Some(0.2));
        assert_eq!(request.ratio, None);
    }

    #[test]
    fn test_custom_ramp_requires_both() {
        let mut request = ProgressionRequest::new(100, 10, FormulaType::Arithmetic);
        request.starting_baseline = Some(10);
        assert_eq!(request.custom_ramp(), None);
    }

    #[test]
    fn test_from_json_defaults() {
        let request =
            ProgressionRequest::from_json(r#"{"total_emails": 200, "days": 14}"#).unwrap();
        assert_eq!(request.formula, FormulaType::Arithmetic);
        assert_eq!(request.ratio, None);

        let request = ProgressionRequest::from_json(
            r#"{"total_emails": 500, "days": 20, "formula": "geometric", "ratio": 1.2}"#,
        )
        .unwrap();
        assert_eq!(request.formula, FormulaType::Geometric);
        assert_eq!(request.ratio, Some(1.2));
    }

    #[test]
    fn test_from_json_unknown_formula_falls_back() {
        let request = ProgressionRequest::from_json(
            r#"{"total_emails": 300, "days": 7, "formula": "sawtooth"}"#,
        )
        .unwrap();
        assert_eq!(request.formula, FormulaType::Arithmetic);
    }

    #[test]
    fn test_from_json_malformed() {
        let err = ProgressionRequest::from_json("{\"days\": 3").unwrap_err();
        assert!(matches!(err, PlanError::Serialization(_)));
    }
}
