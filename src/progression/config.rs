//! Calculator tunables.

use serde::{Deserialize, Serialize};

/// Bisection settings for [`super::RatioSolver`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Accept a ratio once its alpha is this close to the target.
    pub tolerance: f64,
    /// Stop once the bracket is narrower than this.
    pub min_bracket_width: f64,
    /// Iteration cap.
    pub max_iterations: u32,
    /// Upper bound on the searched ratio.
    pub max_ratio: f64,
    /// Lower bracket offset above 1.0.
    pub epsilon: f64,
    /// Multiplier applied to the minimum feasible alpha when the target is below it.
    pub infeasible_alpha_factor: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            min_bracket_width: 1e-10,
            max_iterations: 100,
            max_ratio: 5.0,
            epsilon: 1e-9,
            infeasible_alpha_factor: 1.1,
        }
    }
}

impl SolverConfig {
    /// Sets the alpha tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the upper ratio bound.
    pub fn with_max_ratio(mut self, max_ratio: f64) -> Self {
        self.max_ratio = max_ratio;
        self
    }
}

/// Geometric ratio used when neither the request nor the config supplies a usable one.
pub const DEFAULT_RATIO: f64 = 1.5;

/// Defaults and correction factors used by [`super::PlanCalculator`].
///
/// # Example
///
/// ```
/// use u_warmup::progression::CalculatorConfig;
///
/// let config = CalculatorConfig::default().with_default_ratio(1.3);
/// assert_eq!(config.default_ratio, 1.3);
/// assert_eq!(config.default_alpha, 0.1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Ratio used when a geometric request supplies none, or one `<= 1`.
    ///
    /// A configured value `<= 1` is itself replaced by [`DEFAULT_RATIO`].
    pub default_ratio: f64,
    /// Alpha used when a geometric_alpha request supplies none.
    pub default_alpha: f64,
    /// Alpha below `1/days` is raised to this factor times `1/days`.
    pub alpha_floor_factor: f64,
    /// Randomize lower band, as a fraction of the daily average.
    pub randomize_low: f64,
    /// Randomize upper band, as a fraction of the daily average.
    pub randomize_high: f64,
    /// Ratio solver settings.
    pub solver: SolverConfig,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            default_ratio: DEFAULT_RATIO,
            default_alpha: 0.1,
            alpha_floor_factor: 1.05,
            randomize_low: 0.6,
            randomize_high: 1.4,
            solver: SolverConfig::default(),
        }
    }
}

impl CalculatorConfig {
    /// Sets the fallback geometric ratio.
    pub fn with_default_ratio(mut self, ratio: f64) -> Self {
        self.default_ratio = ratio;
        self
    }

    /// Sets the fallback alpha.
    pub fn with_default_alpha(mut self, alpha: f64) -> Self {
        self.default_alpha = alpha;
        self
    }

    /// Sets the randomize band.
    pub fn with_randomize_band(mut self, low: f64, high: f64) -> Self {
        self.randomize_low = low;
        self.randomize_high = high;
        self
    }

    /// Sets the solver settings.
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }
}
