//! PlanYear value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// The target year a plan is drawn up for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanYear(i32);

impl PlanYear {
    /// Creates a PlanYear, returning error if outside 2000..=2100.
    pub fn try_new(year: i32) -> Result<Self, ValidationError> {
        if !(2000..=2100).contains(&year) {
            return Err(ValidationError::out_of_range("year", 2000, 2100, year));
        }
        Ok(Self(year))
    }

    /// Returns the year value.
    pub fn value(&self) -> i32 {
        self.0
    }

    /// The prior year, used for actuals and price lookups.
    pub fn prev(&self) -> i32 {
        self.0 - 1
    }
}

impl fmt::Display for PlanYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
