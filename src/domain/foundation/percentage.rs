//! Percentage value objects for uplift and bulk ratio adjustments.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Uplift percent applied to prior-year actuals during baseline seeding.
///
/// Bounded 0..=999: a negative uplift makes no sense for seeding, and the
/// upper bound catches fat-fingered input.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpliftPercent(f64);

impl UpliftPercent {
    /// Zero uplift (carry actuals forward unchanged).
    pub const ZERO: Self = Self(0.0);

    /// Creates an UpliftPercent, returning error if out of range.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || !(0.0..=999.0).contains(&value) {
            return Err(ValidationError::out_of_range(
                "uplift_percent",
                0,
                999,
                value as i32,
            ));
        }
        Ok(Self(value))
    }

    /// Returns the raw percent value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns the multiplier: 1 + percent/100.
    pub fn ratio(&self) -> f64 {
        1.0 + self.0 / 100.0
    }
}

impl Default for UpliftPercent {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for UpliftPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Signed percent adjustment applied to an existing monthly curve.
///
/// May be negative; the resulting multiplier is clamped at zero so a
/// -150% adjustment zeroes the curve rather than flipping its sign.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatioPercent(f64);

impl RatioPercent {
    /// Creates a RatioPercent, returning error for non-finite input.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::invalid_format(
                "ratio_percent",
                "must be a finite number",
            ));
        }
        Ok(Self(value))
    }

    /// Returns the raw percent value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns the multiplier: max(0, 1 + percent/100).
    pub fn ratio(&self) -> f64 {
        (1.0 + self.0 / 100.0).max(0.0)
    }
}

impl fmt::Display for RatioPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}%", self.0)
    }
}
