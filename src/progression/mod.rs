//! Warm-up volume progression calculator.
//!
//! Turns (total contacts, duration, formula type) into a day-by-day
//! sending plan whose volumes sum exactly to the total.
//!
//! # Components
//!
//! - [`fill_ramp_then_absorb_remainder`]: the shared reconciliation step;
//!   the last day always absorbs whatever the strategy left over.
//! - [`RatioSolver`]: bisection for the geometric ratio matching a target
//!   first-step growth rate.
//! - [`strategies`]: the six plan shapes.
//! - [`PlanCalculator`]: validation, parameter normalization, dispatch.
//!
//! # Usage
//!
//! ```
//! use u_warmup::models::{FormulaType, ProgressionRequest};
//! use u_warmup::progression::PlanCalculator;
//!
//! let request = ProgressionRequest::new(1000, 30, FormulaType::GeometricAlpha).with_alpha(0.1);
//! let plan = PlanCalculator::new().calculate(&request).unwrap();
//! assert_eq!(plan.total(), 1000);
//! ```

mod calculator;
mod config;
mod fill;
mod solver;
pub mod strategies;

pub use calculator::{calculate, PlanCalculator};
pub use config::{CalculatorConfig, SolverConfig, DEFAULT_RATIO};
pub use fill::fill_ramp_then_absorb_remainder;
pub use solver::{compute_alpha, RatioSolution, RatioSolver};
pub use strategies::RandomizeBand;
