//! Plan generation strategies.
//!
//! Each strategy proposes volumes for days `1..days` and leaves the last
//! day to [`fill_ramp_then_absorb_remainder`], so every plan sums to the
//! requested total.
//!
//! # Shapes
//!
//! | Strategy | Day `d < days` |
//! |----------|----------------|
//! | Linear ramp | `floor(total * d / T(days))`, `T(n) = n(n+1)/2` |
//! | Custom ramp | `max(0, baseline + increment * (d - 1))` |
//! | Geometric | `floor(u1 * q^(d-1))`, `u1 = total (q-1) / (q^days - 1)` |
//! | Flat | `floor(total / days)` |
//! | Randomize | uniform draw inside a feasibility-narrowed band |

use rand::Rng;

use super::fill::{fill_ramp_then_absorb_remainder, floor_volume};
use super::{RatioSolution, RatioSolver};
use crate::models::ProgressionPlan;

/// Linear ramp weighted by triangular numbers.
///
/// Shared by arithmetic automatic mode and progressive.
pub fn linear_ramp(total: u64, days: u32) -> ProgressionPlan {
    let triangular = f64::from(days) * (f64::from(days) + 1.0) / 2.0;
    let unit = total as f64 / triangular;
    fill_ramp_then_absorb_remainder(days, total, |day, _| floor_volume(unit * f64::from(day)))
}

/// Arithmetic progression.
///
/// With `custom = Some((baseline, increment))`, day `d` is
/// `baseline + increment * (d - 1)` floored at zero. Once the running
/// total reaches `total` the remaining days are zero; a shortfall lands
/// on the last day. Without `custom`, falls back to [`linear_ramp`].
pub fn arithmetic(total: u64, days: u32, custom: Option<(i64, i64)>) -> ProgressionPlan {
    let Some((baseline, increment)) = custom else {
        return linear_ramp(total, days);
    };

    fill_ramp_then_absorb_remainder(days, total, |day, _| {
        let value = baseline.saturating_add(increment.saturating_mul(i64::from(day) - 1));
        u64::try_from(value).unwrap_or(0)
    })
}

/// Progressive ramp. Same shape as arithmetic automatic mode.
pub fn progressive(total: u64, days: u32) -> ProgressionPlan {
    linear_ramp(total, days)
}

/// Geometric progression with fixed ratio `q`.
///
/// The first-day volume is chosen so the full series sums to `total`.
/// A ratio `<= 1` degenerates to the `q -> 1` limit, a flat plan; callers
/// are expected to correct it first (see [`super::PlanCalculator`]).
pub fn geometric(total: u64, days: u32, ratio: f64) -> ProgressionPlan {
    if ratio <= 1.0 {
        return flat(total, days);
    }
    fill_ramp_then_absorb_remainder(days, total, |day, _| {
        floor_volume(geometric_term(total, ratio, days, day))
    })
}

/// Geometric progression whose ratio is solved from a target first-step
/// growth rate.
///
/// `alpha` must already be feasible for `days` (at least `1/days`); the
/// solver raises it otherwise. A single-day campaign needs no ratio.
pub fn geometric_alpha(
    total: u64,
    days: u32,
    alpha: f64,
    solver: &RatioSolver,
) -> (ProgressionPlan, Option<RatioSolution>) {
    if days <= 1 {
        return (fill_ramp_then_absorb_remainder(days, total, |_, _| 0), None);
    }
    let solution = solver.solve(days, alpha);
    (geometric(total, days, solution.ratio), Some(solution))
}

/// `total * (q-1) * q^(day-1) / (q^days - 1)`, evaluated without overflow.
fn geometric_term(total: u64, q: f64, days: u32, day: u32) -> f64 {
    let ln_q = (q - 1.0).ln_1p();
    let numerator = (-(f64::from(days) - f64::from(day) + 1.0) * ln_q).exp();
    let denominator = -(-f64::from(days) * ln_q).exp_m1();
    total as f64 * (q - 1.0) * numerator / denominator
}

/// Uniform volume every day.
pub fn flat(total: u64, days: u32) -> ProgressionPlan {
    let per_day = if days == 0 { 0 } else { total / u64::from(days) };
    fill_ramp_then_absorb_remainder(days, total, |_, _| per_day)
}

/// Per-day volume band for [`randomize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomizeBand {
    /// Smallest volume any day may receive.
    pub min_per_day: u64,
    /// Largest volume any day may receive.
    pub max_per_day: u64,
}

impl RandomizeBand {
    /// `[floor(avg * low), ceil(avg * high)]` around `avg = total / days`.
    ///
    /// `low` is clamped to `[0, 1]` and `high` to at least 1 so the band
    /// always contains the average.
    pub fn new(total: u64, days: u32, low: f64, high: f64) -> Self {
        let avg = if days == 0 {
            0.0
        } else {
            total as f64 / f64::from(days)
        };
        let low = low.clamp(0.0, 1.0);
        let high = high.max(1.0);
        Self {
            min_per_day: floor_volume(avg * low),
            max_per_day: (avg * high).ceil().max(0.0) as u64,
        }
    }

    /// Whether a volume lies inside the band.
    pub fn contains(&self, emails: u64) -> bool {
        (self.min_per_day..=self.max_per_day).contains(&emails)
    }

    /// Feasible range for the current day given what is left to send.
    ///
    /// `days_left` counts the current day. Any value in the returned range
    /// leaves the remaining days able to finish exactly on the total while
    /// staying inside the band.
    pub fn feasible_range(&self, remaining: u64, days_left: u32) -> (u64, u64) {
        let after = u64::from(days_left.saturating_sub(1));
        let max_possible = self
            .max_per_day
            .min(remaining.saturating_sub(after.saturating_mul(self.min_per_day)));
        let min_possible = self
            .min_per_day
            .max(remaining.saturating_sub(after.saturating_mul(self.max_per_day)));
        (min_possible.min(max_possible), max_possible)
    }
}

/// Random volumes inside `band`, finishing exactly on `total`.
///
/// Each intermediate day draws uniformly from
/// [`RandomizeBand::feasible_range`]; the last day takes the rest.
pub fn randomize<R: Rng + ?Sized>(
    total: u64,
    days: u32,
    band: RandomizeBand,
    rng: &mut R,
) -> ProgressionPlan {
    fill_ramp_then_absorb_remainder(days, total, |day, remaining| {
        let (lo, hi) = band.feasible_range(remaining, days - day + 1);
        rng.random_range(lo..=hi)
    })
}
