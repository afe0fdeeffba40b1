//! Formula type tags.
//!
//! A formula type names the shape of a warm-up progression. The string
//! tags are stored on campaign records, so they must stay stable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PlanError;

/// Volume progression shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum FormulaType {
    /// Linear ramp, or a custom baseline + increment when both are given.
    #[default]
    Arithmetic,
    /// Fixed day-over-day ratio.
    Geometric,
    /// Geometric ratio solved from a target first-step growth rate.
    GeometricAlpha,
    /// Linear ramp weighted by triangular numbers.
    Progressive,
    /// Uniform volume every day.
    Flat,
    /// Random volumes within a band around the daily average.
    Randomize,
}

impl FormulaType {
    /// All formula types, in tag order.
    pub const ALL: [FormulaType; 6] = [
        FormulaType::Arithmetic,
        FormulaType::Geometric,
        FormulaType::GeometricAlpha,
        FormulaType::Progressive,
        FormulaType::Flat,
        FormulaType::Randomize,
    ];

    /// Stable string tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormulaType::Arithmetic => "arithmetic",
            FormulaType::Geometric => "geometric",
            FormulaType::GeometricAlpha => "geometric_alpha",
            FormulaType::Progressive => "progressive",
            FormulaType::Flat => "flat",
            FormulaType::Randomize => "randomize",
        }
    }

    /// Lenient parse: unrecognized tags fall back to [`FormulaType::Arithmetic`].
    pub fn from_tag(tag: &str) -> Self {
        match tag.parse() {
            Ok(formula) => formula,
            Err(_) => {
                tracing::warn!(tag, "unknown formula type, falling back to arithmetic");
                FormulaType::Arithmetic
            }
        }
    }
}

impl fmt::Display for FormulaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for FormulaType {
    fn from(tag: String) -> Self {
        FormulaType::from_tag(&tag)
    }
}

impl FromStr for FormulaType {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormulaType::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s.trim())
            .ok_or_else(|| PlanError::UnknownFormula(s.to_string()))
    }
}
