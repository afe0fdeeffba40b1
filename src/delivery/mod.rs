//! Consumer-side helpers for the sending process.
//!
//! The calculator produces a plan once; the sending process reads it
//! back every day. This module covers that second half.
//!
//! # Resolver
//!
//! `DailyVolumeResolver` looks up today's volume in a stored plan and
//! falls back to a capped linear ramp (`LinearFallback`) when the plan
//! has no entry for the day.
//!
//! # KPI
//!
//! `PlanKpi` summarizes a plan's shape: peak, mean, and the steepest
//! day-over-day growth.

mod kpi;
mod resolver;

pub use kpi::PlanKpi;
pub use resolver::{campaign_day, DailyVolume, DailyVolumeResolver, LinearFallback, VolumeSource};
