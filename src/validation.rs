//! Input validation for progression requests.
//!
//! Every formula type goes through the same checks before dispatch, so
//! a request is rejected or accepted identically regardless of shape.
//! Detects:
//! - Non-positive total email count
//! - Non-positive duration
//! - Negative custom-mode baseline
//! - Non-finite ratio or alpha
//! - Duration longer than [`MAX_CAMPAIGN_DAYS`]

use serde::{Deserialize, Serialize};

use crate::models::ProgressionRequest;

/// Longest campaign accepted, in days (ten years).
pub const MAX_CAMPAIGN_DAYS: i64 = 3_650;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// `total_emails` is zero or negative.
    NonPositiveTotal,
    /// `days` is zero or negative.
    NonPositiveDays,
    /// `days` exceeds [`MAX_CAMPAIGN_DAYS`].
    DurationTooLong,
    /// `starting_baseline` is negative.
    NegativeBaseline,
    /// `ratio` or `alpha` is NaN or infinite.
    NonFiniteParameter,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a progression request.
///
/// Checks:
/// 1. `total_emails > 0`
/// 2. `0 < days <= MAX_CAMPAIGN_DAYS`
/// 3. `starting_baseline >= 0` when given
/// 4. `ratio` and `alpha` are finite when given
///
/// Out-of-range but finite `ratio`/`alpha` values are not errors; the
/// calculator corrects them.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_request(request: &ProgressionRequest) -> ValidationResult {
    let mut errors = Vec::new();

    if request.total_emails <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveTotal,
            format!("total_emails must be positive, got {}", request.total_emails),
        ));
    }

    if request.days <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveDays,
            format!("days must be positive, got {}", request.days),
        ));
    } else if request.days > MAX_CAMPAIGN_DAYS {
        errors.push(ValidationError::new(
            ValidationErrorKind::DurationTooLong,
            format!("days must not exceed {MAX_CAMPAIGN_DAYS}, got {}", request.days),
        ));
    }

    if let Some(baseline) = request.starting_baseline {
        if baseline < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeBaseline,
                format!("starting_baseline must not be negative, got {baseline}"),
            ));
        }
    }

    for (name, value) in [("ratio", request.ratio), ("alpha", request.alpha)] {
        if let Some(v) = value {
            if !v.is_finite() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NonFiniteParameter,
                    format!("{name} must be finite, got {v}"),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
