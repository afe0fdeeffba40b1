//! Progression plan (solution) model.
//!
//! A plan is the ordered per-day volume sequence for one campaign. Plans
//! produced by the calculator have exactly one entry per day, numbered
//! `1..=days`, and their volumes sum to the requested total.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::PlanError;

/// Permitted send volume for one campaign day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlanEntry {
    /// Day number, starting at 1.
    pub day: u32,
    /// Number of emails to send on this day.
    pub emails: u64,
}

impl DayPlanEntry {
    /// Creates an entry.
    pub fn new(day: u32, emails: u64) -> Self {
        Self { day, emails }
    }
}

/// Ordered day-by-day sending plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionPlan {
    /// Entries in day order.
    pub entries: Vec<DayPlanEntry>,
}

impl ProgressionPlan {
    /// Builds a plan from volumes, numbering days from 1.
    pub fn from_volumes(volumes: impl IntoIterator<Item = u64>) -> Self {
        let entries = volumes
            .into_iter()
            .zip(1u32..)
            .map(|(emails, day)| DayPlanEntry::new(day, emails))
            .collect();
        Self { entries }
    }

    /// Number of days in the plan.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the plan has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all daily volumes.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.emails).sum()
    }

    /// Daily volumes in day order.
    pub fn volumes(&self) -> Vec<u64> {
        self.entries.iter().map(|e| e.emails).collect()
    }

    /// Iterates over entries in day order.
    pub fn iter(&self) -> impl Iterator<Item = &DayPlanEntry> {
        self.entries.iter()
    }

    /// Volume for the given day, if the plan has an entry for it.
    pub fn volume_for_day(&self, day: u32) -> Option<u64> {
        self.entries.iter().find(|e| e.day == day).map(|e| e.emails)
    }

    /// Volumes keyed by day number.
    pub fn to_day_map(&self) -> BTreeMap<u32, u64> {
        self.entries.iter().map(|e| (e.day, e.emails)).collect()
    }

    /// Rebuilds a plan from a day-keyed map.
    pub fn from_day_map(map: BTreeMap<u32, u64>) -> Self {
        Self {
            entries: map
                .into_iter()
                .map(|(day, emails)| DayPlanEntry::new(day, emails))
                .collect(),
        }
    }

    /// Serializes as a JSON object keyed by day, e.g. `{"1":10,"2":12}`.
    pub fn to_json(&self) -> Result<String, PlanError> {
        Ok(serde_json::to_string(&self.to_day_map())?)
    }

    /// Parses the day-keyed JSON produced by [`ProgressionPlan::to_json`].
    pub fn from_json(json: &str) -> Result<Self, PlanError> {
        let map: BTreeMap<u32, u64> = serde_json::from_str(json)?;
        Ok(Self::from_day_map(map))
    }
}

impl<'a> IntoIterator for &'a ProgressionPlan {
    type Item = &'a DayPlanEntry;
    type IntoIter = std::slice::Iter<'a, DayPlanEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
