//! Plan shape metrics (KPIs).
//!
//! Summarizes a plan for display or for comparing formula choices
//! before a campaign is activated.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total | Sum of daily volumes |
//! | Peak | Largest daily volume (first day on ties) |
//! | Mean | Total / days |
//! | Max Growth | Largest `v[d+1] / v[d]` over days before the last |

use crate::models::ProgressionPlan;

/// Plan performance indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanKpi {
    /// Sum of all daily volumes.
    pub total: u64,
    /// Number of days.
    pub days: usize,
    /// Day-1 volume.
    pub first_day_volume: u64,
    /// Final-day volume.
    pub last_day_volume: u64,
    /// Largest daily volume.
    pub peak_volume: u64,
    /// Day on which the peak first occurs.
    pub peak_day: u32,
    /// Mean daily volume.
    pub mean_volume: f64,
    /// Largest day-over-day ratio among days `1..days`, skipping zero days.
    ///
    /// The last day absorbs the remainder, so its jump is not a growth step.
    /// `None` when no consecutive pair qualifies.
    pub max_growth_ratio: Option<f64>,
}

impl PlanKpi {
    /// Computes KPIs for a plan.
    pub fn calculate(plan: &ProgressionPlan) -> Self {
        let volumes = plan.volumes();
        let total = plan.total();
        let days = volumes.len();

        let (peak_day, peak_volume) = plan
            .iter()
            .fold((0, 0), |(best_day, best), e| {
                if e.emails > best || best_day == 0 {
                    (e.day, e.emails)
                } else {
                    (best_day, best)
                }
            });

        let mean_volume = if days == 0 {
            0.0
        } else {
            total as f64 / days as f64
        };

        let body = volumes.get(..days.saturating_sub(1)).unwrap_or(&[]);
        let max_growth_ratio = body
            .windows(2)
            .filter(|w| w[0] > 0)
            .map(|w| w[1] as f64 / w[0] as f64)
            .fold(None, |acc: Option<f64>, r| Some(acc.map_or(r, |a| a.max(r))));

        Self {
            total,
            days,
            first_day_volume: volumes.first().copied().unwrap_or(0),
            last_day_volume: volumes.last().copied().unwrap_or(0),
            peak_volume,
            peak_day,
            mean_volume,
            max_growth_ratio,
        }
    }

    /// Whether no intermediate day grows faster than `max_ratio`.
    pub fn within_growth_limit(&self, max_ratio: f64) -> bool {
        self.max_growth_ratio.map_or(true, |r| r <= max_ratio)
    }
}
