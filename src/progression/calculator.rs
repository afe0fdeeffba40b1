//! Plan dispatcher.
//!
//! Validates a request, normalizes its optional parameters, and routes
//! it to the strategy named by its formula type.

use rand::Rng;
use tracing::{debug, warn};

use super::strategies::{self, RandomizeBand};
use super::{CalculatorConfig, RatioSolver, DEFAULT_RATIO};
use crate::error::PlanError;
use crate::models::{FormulaType, ProgressionPlan, ProgressionRequest};
use crate::validation::validate_request;

/// Progression calculator.
///
/// Stateless apart from its configuration; safe to share across threads.
///
/// # Example
///
/// ```
/// use u_warmup::models::{FormulaType, ProgressionRequest};
/// use u_warmup::progression::PlanCalculator;
///
/// let calculator = PlanCalculator::new();
/// let plan = calculator
///     .calculate(&ProgressionRequest::new(105, 10, FormulaType::Flat))
///     .unwrap();
/// assert_eq!(plan.len(), 10);
/// assert_eq!(plan.volume_for_day(10), Some(15));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PlanCalculator {
    config: CalculatorConfig,
    solver: RatioSolver,
}

impl PlanCalculator {
    /// Creates a calculator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a calculator with the given settings.
    pub fn with_config(config: CalculatorConfig) -> Self {
        let solver = RatioSolver::with_config(config.solver.clone());
        Self { config, solver }
    }

    /// Calculator settings.
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Generates a plan, drawing randomize volumes from the thread-local RNG.
    pub fn calculate(&self, request: &ProgressionRequest) -> Result<ProgressionPlan, PlanError> {
        self.calculate_with_rng(request, &mut rand::rng())
    }

    /// Generates a plan using the supplied random source.
    ///
    /// Only [`FormulaType::Randomize`] consumes randomness.
    ///
    /// # Errors
    /// [`PlanError::InvalidRequest`] when `total_emails` or `days` is not
    /// positive, or another field fails [`validate_request`].
    pub fn calculate_with_rng<R: Rng + ?Sized>(
        &self,
        request: &ProgressionRequest,
        rng: &mut R,
    ) -> Result<ProgressionPlan, PlanError> {
        validate_request(request).map_err(PlanError::InvalidRequest)?;
        // Both fit after validation.
        let total = request.total_emails as u64;
        let days = request.days as u32;

        debug!(
            formula = %request.formula,
            total,
            days,
            "calculating progression"
        );

        let plan = match request.formula {
            FormulaType::Arithmetic => strategies::arithmetic(total, days, request.custom_ramp()),
            FormulaType::Progressive => strategies::progressive(total, days),
            FormulaType::Geometric => {
                strategies::geometric(total, days, self.resolve_ratio(request.ratio))
            }
            FormulaType::GeometricAlpha => {
                let alpha = self.resolve_alpha(request.alpha, days);
                let (plan, solution) =
                    strategies::geometric_alpha(total, days, alpha, &self.solver);
                if let Some(solution) = solution {
                    debug!(ratio = solution.ratio, alpha = solution.alpha, "geometric_alpha ratio");
                }
                plan
            }
            FormulaType::Flat => strategies::flat(total, days),
            FormulaType::Randomize => {
                let band = RandomizeBand::new(
                    total,
                    days,
                    self.config.randomize_low,
                    self.config.randomize_high,
                );
                strategies::randomize(total, days, band, rng)
            }
        };

        Ok(plan)
    }

    /// Ratio to use for a geometric plan.
    ///
    /// Missing ratios and ratios `<= 1` become `default_ratio`, which in
    /// turn falls back to [`DEFAULT_RATIO`] when it is not above 1.
    pub fn resolve_ratio(&self, ratio: Option<f64>) -> f64 {
        match ratio {
            Some(q) if q > 1.0 => q,
            Some(q) => {
                let corrected = self.default_ratio();
                warn!(
                    requested = q,
                    corrected,
                    "geometric ratio must exceed 1, using default"
                );
                corrected
            }
            None => self.default_ratio(),
        }
    }

    fn default_ratio(&self) -> f64 {
        let configured = self.config.default_ratio;
        if configured.is_finite() && configured > 1.0 {
            configured
        } else {
            warn!(
                configured,
                fallback = DEFAULT_RATIO,
                "configured default ratio must exceed 1"
            );
            DEFAULT_RATIO
        }
    }

    /// Alpha to use for a geometric_alpha plan over `days`.
    ///
    /// Alpha below the reachable minimum `1/days` is raised to
    /// `alpha_floor_factor / days`.
    pub fn resolve_alpha(&self, alpha: Option<f64>, days: u32) -> f64 {
        let alpha = alpha.unwrap_or(self.config.default_alpha);
        let min_alpha = 1.0 / f64::from(days.max(1));
        if alpha < min_alpha {
            let raised = self.config.alpha_floor_factor * min_alpha;
            warn!(
                requested = alpha,
                raised,
                days,
                "alpha below 1/days, raising"
            );
            raised
        } else {
            alpha
        }
    }
}

/// Generates a plan from raw campaign parameters.
///
/// `formula_type` is parsed leniently: unrecognized tags produce an
/// arithmetic plan.
///
/// # Example
///
/// ```
/// use u_warmup::calculate;
///
/// let plan = calculate(500, 20, "geometric", Some(1.2), None, None).unwrap();
/// assert_eq!(plan.total(), 500);
/// ```
pub fn calculate(
    total_emails: i64,
    days: i64,
    formula_type: &str,
    ratio: Option<f64>,
    starting_baseline: Option<i64>,
    increase_per_day: Option<i64>,
) -> Result<ProgressionPlan, PlanError> {
    let mut request = ProgressionRequest::new(
        total_emails,
        days,
        FormulaType::from_tag(formula_type),
    )
    .with_ratio_opt(ratio);
    request.starting_baseline = starting_baseline;
    request.increase_per_day = increase_per_day;

    PlanCalculator::new().calculate(&request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_flat_scenarios() {
        let plan = calculate(100, 10, "flat", None, None, None).unwrap();
        assert_eq!(plan.volumes(), vec![10; 10]);

        let plan = calculate(105, 10, "flat", None, None, None).unwrap();
        assert_eq!(plan.volume_for_day(9), Some(10));
        assert_eq!(plan.volume_for_day(10), Some(15));
        assert_eq!(plan.total(), 105);
    }

    #[test]
    fn test_arithmetic_automatic() {
        let plan = calculate(1000, 30, "arithmetic", None, None, None).unwrap();
        let volumes = plan.volumes();
        assert_eq!(volumes.len(), 30);
        assert!(volumes[..29].windows(2).all(|w| w[0] < w[1]));
        assert_eq!(plan.total(), 1000);
    }

    #[test]
    fn test_arithmetic_custom_needs_both_parameters() {
        let custom = calculate(100, 5, "arithmetic", None, Some(10), Some(2)).unwrap();
        assert_eq!(custom.volumes(), vec![10, 12, 14, 16, 48]);

        let half = calculate(100, 5, "arithmetic", None, Some(10), None).unwrap();
        assert_eq!(half, calculate(100, 5, "arithmetic", None, None, None).unwrap());
    }

    #[test]
    fn test_unknown_tag_falls_back_to_arithmetic() {
        let fallback = calculate(300, 7, "sawtooth", None, None, None).unwrap();
        let arithmetic = calculate(300, 7, "arithmetic", None, None, None).unwrap();
        assert_eq!(fallback, arithmetic);
    }

    #[test]
    fn test_geometric_scenario() {
        let plan = calculate(500, 20, "geometric", Some(1.2), None, None).unwrap();
        assert_eq!(plan.len(), 20);
        assert_eq!(plan.total(), 500);
    }

    #[test]
    fn test_geometric_ratio_correction() {
        let calculator = PlanCalculator::new();
        assert_eq!(calculator.resolve_ratio(Some(0.8)), 1.5);
        assert_eq!(calculator.resolve_ratio(Some(1.0)), 1.5);
        assert_eq!(calculator.resolve_ratio(None), 1.5);
        assert_eq!(calculator.resolve_ratio(Some(1.2)), 1.2);

        let corrected = calculate(500, 20, "geometric", Some(0.5), None, None).unwrap();
        let default = calculate(500, 20, "geometric", Some(1.5), None, None).unwrap();
        assert_eq!(corrected, default);
    }

    #[test]
    fn test_invalid_default_ratio_config() {
        for configured in [1.0, 0.7, f64::NAN] {
            let calculator =
                PlanCalculator::with_config(CalculatorConfig::default().with_default_ratio(configured));
            assert_eq!(calculator.resolve_ratio(None), DEFAULT_RATIO);
            assert_eq!(calculator.resolve_ratio(Some(0.9)), DEFAULT_RATIO);

            let request = ProgressionRequest::new(500, 20, FormulaType::Geometric);
            let plan = calculator.calculate(&request).unwrap();
            assert_eq!(plan, strategies::geometric(500, 20, DEFAULT_RATIO));
            assert_ne!(plan, strategies::flat(500, 20));
        }

        let calculator =
            PlanCalculator::with_config(CalculatorConfig::default().with_default_ratio(1.3));
        assert_eq!(calculator.resolve_ratio(None), 1.3);
    }

    #[test]
    fn test_duration_limit_rejected_before_allocation() {
        let request = ProgressionRequest::new(100, i64::from(u32::MAX), FormulaType::Flat);
        let err = PlanCalculator::new().calculate(&request).unwrap_err();
        assert_eq!(
            err.validation_errors()[0].kind,
            ValidationErrorKind::DurationTooLong
        );
    }

    #[test]
    fn test_alpha_correction() {
        let calculator = PlanCalculator::new();
        assert_eq!(calculator.resolve_alpha(None, 30), 0.1);
        assert_eq!(calculator.resolve_alpha(Some(0.3), 30), 0.3);
        // 1/5 = 0.2 is the minimum; 0.01 is raised to 1.05 * 0.2
        assert!((calculator.resolve_alpha(Some(0.01), 5) - 0.21).abs() < 1e-12);
    }

    #[test]
    fn test_geometric_alpha_rejects_non_positive() {
        let calculator = PlanCalculator::new();
        for (total, days) in [(0, 10), (-5, 10), (100, 0), (100, -1)] {
            let request = ProgressionRequest::new(total, days, FormulaType::GeometricAlpha);
            let err = calculator.calculate(&request).unwrap_err();
            assert!(matches!(err, PlanError::InvalidRequest(_)));
        }
    }

    #[test]
    fn test_every_formula_rejects_non_positive() {
        let calculator = PlanCalculator::new();
        for formula in FormulaType::ALL {
            let err = calculator
                .calculate(&ProgressionRequest::new(0, 10, formula))
                .unwrap_err();
            assert_eq!(
                err.validation_errors()[0].kind,
                ValidationErrorKind::NonPositiveTotal
            );
        }
    }

    #[test]
    fn test_geometric_alpha_low_alpha_still_conserves() {
        let request =
            ProgressionRequest::new(1000, 5, FormulaType::GeometricAlpha).with_alpha(0.01);
        let plan = PlanCalculator::new().calculate(&request).unwrap();
        assert_eq!(plan.len(), 5);
        assert_eq!(plan.total(), 1000);
    }

    #[test]
    fn test_single_day_every_formula() {
        let calculator = PlanCalculator::new();
        for formula in FormulaType::ALL {
            let plan = calculator
                .calculate(&ProgressionRequest::new(77, 1, formula))
                .unwrap();
            assert_eq!(plan.volumes(), vec![77], "{formula}");
        }
    }

    #[test]
    fn test_randomize_with_injected_rng() {
        let calculator = PlanCalculator::new();
        let request = ProgressionRequest::new(200, 14, FormulaType::Randomize);
        let band = RandomizeBand::new(200, 14, 0.6, 1.4);
        let mut rng = SmallRng::seed_from_u64(1);

        for _ in 0..1000 {
            let plan = calculator.calculate_with_rng(&request, &mut rng).unwrap();
            assert_eq!(plan.len(), 14);
            assert_eq!(plan.total(), 200);
            assert!(plan.iter().all(|e| band.contains(e.emails)));
        }
    }

    #[test]
    fn test_deterministic_formulas() {
        let calculator = PlanCalculator::new();
        for formula in FormulaType::ALL
            .into_iter()
            .filter(|f| *f != FormulaType::Randomize)
        {
            let request = ProgressionRequest::new(2500, 21, formula);
            assert_eq!(
                calculator.calculate(&request).unwrap(),
                calculator.calculate(&request).unwrap()
            );
        }
    }

    #[test]
    fn test_custom_band_config() {
        let calculator =
            PlanCalculator::with_config(CalculatorConfig::default().with_randomize_band(0.9, 1.1));
        let request = ProgressionRequest::new(1000, 10, FormulaType::Randomize);
        let plan = calculator
            .calculate_with_rng(&request, &mut SmallRng::seed_from_u64(3))
            .unwrap();
        let band = RandomizeBand::new(1000, 10, 0.9, 1.1);
        assert!(band.min_per_day >= 90 && band.max_per_day <= 111);
        assert!(plan.iter().all(|e| band.contains(e.emails)));
        assert_eq!(plan.total(), 1000);
    }
}
