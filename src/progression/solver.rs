//! Geometric ratio solver.
//!
//! Finds the ratio `q > 1` whose geometric progression over `n` days has
//! a given first-step growth rate
//!
//! ```text
//! alpha(q) = q^(n-1) * (q - 1) / (q^n - 1)
//! ```
//!
//! `alpha` rises monotonically from `1/n` (as `q -> 1`) towards 1, so
//! plain bisection over `q` is enough. The expression is evaluated as
//! `(q - 1) / ((q - 1) - expm1(-(n-1) * ln q))`, which neither overflows
//! for long campaigns nor loses precision next to `q = 1`.
//!
//! # Reference
//! Burden & Faires (2010), "Numerical Analysis", Ch. 2.1 (Bisection Method)

use tracing::{debug, warn};

use super::SolverConfig;

/// First-step growth rate of a geometric progression over `n` days.
///
/// Returns `1.0` at the degenerate boundary `q <= 1`.
pub fn compute_alpha(q: f64, n: u32) -> f64 {
    if q <= 1.0 {
        return 1.0;
    }
    let step = q - 1.0;
    let tail = (-(f64::from(n) - 1.0) * step.ln_1p()).exp_m1();
    step / (step - tail)
}

/// Outcome of a ratio solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioSolution {
    /// Solved ratio.
    pub ratio: f64,
    /// `compute_alpha(ratio, n)`.
    pub alpha: f64,
    /// Alpha the bisection aimed for (raised if the request was infeasible).
    pub target_alpha: f64,
    /// Bisection steps taken.
    pub iterations: u32,
    /// Whether `alpha` landed within tolerance of `target_alpha`.
    pub converged: bool,
}

/// Bisection root-finder for the geometric ratio.
///
/// Deterministic: the same inputs always yield the same ratio.
///
/// # Example
///
/// ```
/// use u_warmup::progression::{compute_alpha, RatioSolver};
///
/// let solution = RatioSolver::new().solve(30, 0.1);
/// assert!(solution.converged);
/// assert!((compute_alpha(solution.ratio, 30) - 0.1).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RatioSolver {
    config: SolverConfig,
}

impl RatioSolver {
    /// Creates a solver with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a solver with the given settings.
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Solver settings.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves for `q` such that `compute_alpha(q, n) ≈ target_alpha`.
    ///
    /// If `target_alpha` is below the smallest alpha reachable inside the
    /// search bracket, the target is raised to that minimum times
    /// `infeasible_alpha_factor`. Never fails: without convergence the
    /// midpoint of the final bracket is returned and a warning logged.
    pub fn solve(&self, n: u32, target_alpha: f64) -> RatioSolution {
        let lower = 1.0 + self.config.epsilon;
        let min_alpha = compute_alpha(lower, n);

        let target = if min_alpha > target_alpha {
            let raised = min_alpha * self.config.infeasible_alpha_factor;
            warn!(
                days = n,
                requested = target_alpha,
                raised,
                "alpha below feasible minimum, raising target"
            );
            raised
        } else {
            target_alpha
        };

        let solution = self.bisect(n, target, lower);
        if solution.converged {
            debug!(
                days = n,
                ratio = solution.ratio,
                iterations = solution.iterations,
                "ratio solved"
            );
        } else {
            warn!(
                days = n,
                target,
                ratio = solution.ratio,
                alpha = solution.alpha,
                "ratio solver did not converge"
            );
        }
        solution
    }

    fn bisect(&self, n: u32, target: f64, lower: f64) -> RatioSolution {
        let mut lo = lower;
        let mut hi = (1.0 + target * f64::from(n))
            .min(self.config.max_ratio)
            .max(lo);
        let mut mid = (lo + hi) / 2.0;
        let mut alpha = compute_alpha(mid, n);
        let mut iterations = 0;

        while iterations < self.config.max_iterations {
            iterations += 1;
            mid = (lo + hi) / 2.0;
            alpha = compute_alpha(mid, n);

            if (alpha - target).abs() < self.config.tolerance {
                break;
            }
            if alpha < target {
                lo = mid;
            } else {
                hi = mid;
            }
            if hi - lo < self.config.min_bracket_width {
                mid = (lo + hi) / 2.0;
                alpha = compute_alpha(mid, n);
                break;
            }
        }

        RatioSolution {
            ratio: mid,
            alpha,
            target_alpha: target,
            iterations,
            converged: (alpha - target).abs() < self.config.tolerance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_alpha_boundaries() {
        assert_eq!(compute_alpha(1.0, 10), 1.0);
        assert_eq!(compute_alpha(0.5, 10), 1.0);
        // Approaches 1/n just above q = 1
        assert!((compute_alpha(1.0 + 1e-9, 10) - 0.1).abs() < 1e-6);
        // Single day: the whole volume is the first step
        assert!((compute_alpha(2.0, 1) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_compute_alpha_matches_direct_formula() {
        let q: f64 = 1.3;
        let n = 12;
        let direct = q.powi(n - 1) * (q - 1.0) / (q.powi(n) - 1.0);
        assert!((compute_alpha(q, n as u32) - direct).abs() < 1e-12);
    }

    #[test]
    fn test_compute_alpha_increasing() {
        let mut prev = compute_alpha(1.0 + 1e-9, 20);
        for i in 1..=40 {
            let a = compute_alpha(1.0 + i as f64 * 0.1, 20);
            assert!(a > prev);
            prev = a;
        }
    }

    #[test]
    fn test_compute_alpha_long_campaign_is_finite() {
        let a = compute_alpha(5.0, 10_000);
        assert!(a.is_finite());
        assert!((a - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_solve_feasible() {
        let solution = RatioSolver::new().solve(30, 0.1);
        assert!(solution.converged);
        assert!(solution.ratio > 1.0);
        assert!((compute_alpha(solution.ratio, 30) - 0.1).abs() < 1e-6);
        assert_eq!(solution.target_alpha, 0.1);
    }

    #[test]
    fn test_solve_infeasible_low_alpha() {
        // Minimum feasible alpha for 5 days is about 0.2
        let solver = RatioSolver::new();
        let solution = solver.solve(5, 0.01);
        assert!(solution.target_alpha > 0.2);
        assert!(solution.alpha >= solution.target_alpha - solver.config().tolerance);
        assert!(solution.ratio > 1.0);
        assert!(solution.converged);
    }

    #[test]
    fn test_solve_unreachable_high_alpha() {
        // alpha(5.0) for 10 days is about 0.8, so 0.95 cannot be met
        let solution = RatioSolver::new().solve(10, 0.95);
        assert!(!solution.converged);
        assert!(solution.ratio <= 5.0);
        assert!(solution.ratio > 4.9);
    }

    #[test]
    fn test_solve_is_deterministic() {
        let solver = RatioSolver::new();
        assert_eq!(solver.solve(21, 0.15), solver.solve(21, 0.15));
    }

    #[test]
    fn test_iteration_cap() {
        let solver = RatioSolver::with_config(SolverConfig::default().with_max_iterations(3));
        let solution = solver.solve(30, 0.1);
        assert_eq!(solution.iterations, 3);
    }
}
