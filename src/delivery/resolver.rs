//! Daily volume lookup for the sending process.
//!
//! The sending process asks, once per scheduled run, how many contacts
//! it may email today. The answer comes from the stored plan; when the
//! plan has no entry for the day it falls back to a capped linear ramp.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::ProgressionPlan;

/// Campaign day number for a whole number of elapsed days since start.
///
/// The start date itself is day 1.
#[inline]
pub fn campaign_day(elapsed_days: u32) -> u32 {
    elapsed_days.saturating_add(1)
}

/// Linear volume used when a plan has no entry for the requested day.
///
/// `min(cap, start_volume + increment * (day - 1))`, floored at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearFallback {
    /// Day-1 volume.
    pub start_volume: u64,
    /// Daily change in volume.
    pub increment: i64,
    /// Upper bound, normally the campaign's total contact count.
    pub cap: u64,
}

impl LinearFallback {
    /// Creates a fallback ramp.
    pub fn new(start_volume: u64, increment: i64, cap: u64) -> Self {
        Self {
            start_volume,
            increment,
            cap,
        }
    }

    /// Volume for the given day (days start at 1).
    pub fn volume_for_day(&self, day: u32) -> u64 {
        let steps = i128::from(day.saturating_sub(1));
        let value = i128::from(self.start_volume) + i128::from(self.increment) * steps;
        let value = value.clamp(0, i128::from(self.cap));
        // Clamped into u64 range above.
        value as u64
    }
}

/// Where a resolved volume came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeSource {
    /// The plan had an entry for the day.
    Plan,
    /// The linear fallback supplied the volume.
    Fallback,
}

/// A resolved daily send volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyVolume {
    /// Day number.
    pub day: u32,
    /// Permitted send volume.
    pub emails: u64,
    /// Origin of the volume.
    pub source: VolumeSource,
}

/// Resolves today's permitted volume from a plan and a fallback.
///
/// # Example
///
/// ```
/// use u_warmup::delivery::{DailyVolumeResolver, LinearFallback, VolumeSource};
/// use u_warmup::models::ProgressionPlan;
///
/// let plan = ProgressionPlan::from_volumes(vec![10, 20]);
/// let resolver = DailyVolumeResolver::new(plan, LinearFallback::new(10, 10, 1000));
///
/// assert_eq!(resolver.resolve(2).emails, 20);
/// let beyond = resolver.resolve(5);
/// assert_eq!(beyond.source, VolumeSource::Fallback);
/// assert_eq!(beyond.emails, 50);
/// ```
#[derive(Debug, Clone)]
pub struct DailyVolumeResolver {
    plan: ProgressionPlan,
    fallback: LinearFallback,
}

impl DailyVolumeResolver {
    /// Creates a resolver.
    pub fn new(plan: ProgressionPlan, fallback: LinearFallback) -> Self {
        Self { plan, fallback }
    }

    /// The stored plan.
    pub fn plan(&self) -> &ProgressionPlan {
        &self.plan
    }

    /// Resolves the volume for `day`.
    pub fn resolve(&self, day: u32) -> DailyVolume {
        match self.plan.volume_for_day(day) {
            Some(emails) => DailyVolume {
                day,
                emails,
                source: VolumeSource::Plan,
            },
            None => {
                let emails = self.fallback.volume_for_day(day);
                warn!(day, emails, "no plan entry for day, using linear fallback");
                DailyVolume {
                    day,
                    emails,
                    source: VolumeSource::Fallback,
                }
            }
        }
    }

    /// Resolves the volume for a day given whole days elapsed since start.
    pub fn resolve_elapsed(&self, elapsed_days: u32) -> DailyVolume {
        self.resolve(campaign_day(elapsed_days))
    }
}
