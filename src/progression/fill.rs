//! Remainder reconciliation shared by every strategy.
//!
//! Days `1..days` take whatever the strategy proposes, capped at the
//! emails still unassigned; the last day takes exactly what is left.
//! The plan total therefore always equals the requested total, and no
//! day can go negative even if floating-point rounding overshoots.

use crate::models::ProgressionPlan;

/// Builds a plan from a per-day volume function.
///
/// `per_day(day, remaining)` is called for days `1..days` in order, where
/// `remaining` is the number of emails not yet assigned. The final day
/// absorbs the remainder.
///
/// Returns an empty plan when `days == 0`.
pub fn fill_ramp_then_absorb_remainder<F>(days: u32, total: u64, mut per_day: F) -> ProgressionPlan
where
    F: FnMut(u32, u64) -> u64,
{
    if days == 0 {
        return ProgressionPlan::default();
    }

    let mut volumes = Vec::with_capacity(days as usize);
    let mut remaining = total;

    for day in 1..days {
        let emails = per_day(day, remaining).min(remaining);
        remaining -= emails;
        volumes.push(emails);
    }
    volumes.push(remaining);

    ProgressionPlan::from_volumes(volumes)
}

/// Floors a non-negative volume; NaN and negatives map to zero.
#[inline]
pub(crate) fn floor_volume(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.floor() as u64
    } else {
        0
    }
}
