//! Warm-up domain models.
//!
//! Provides the data types exchanged with the campaign layer: the
//! request it collects, the formula tag it stores, and the plan it
//! persists and consumes day by day.

mod formula;
mod plan;
mod request;

pub use formula::FormulaType;
pub use plan::{DayPlanEntry, ProgressionPlan};
pub use request::ProgressionRequest;
