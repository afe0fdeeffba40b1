//! Email warm-up volume planning for the U-Engine ecosystem.
//!
//! Ramps the daily sending volume of a newly provisioned domain over a
//! campaign, following a chosen progression, so that reputation builds
//! before full-volume use. Every plan sums exactly to the requested
//! contact count.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `FormulaType`, `ProgressionRequest`,
//!   `DayPlanEntry`, `ProgressionPlan`
//! - **`validation`**: Input checks applied uniformly to every formula
//! - **`progression`**: Ratio solver, plan strategies, and the dispatcher
//! - **`delivery`**: Daily volume lookup with linear fallback, plan KPIs
//!
//! # Architecture
//!
//! The calculator is pure and synchronous. It performs no I/O and keeps
//! no state between calls; randomness is injected by the caller.
//! Sending, persistence, and the campaign UI live outside this crate.
//!
//! # References
//!
//! - Burden & Faires (2010), "Numerical Analysis", Ch. 2.1

pub mod delivery;
pub mod error;
pub mod models;
pub mod progression;
pub mod validation;

pub use error::PlanError;
pub use progression::calculate;
