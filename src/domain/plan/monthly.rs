//! Fixed 12-slot monthly series and the Month value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Calendar month, 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Month(u8);

impl Month {
    /// Creates a Month, returning error if outside 1..=12.
    pub fn try_new(month: u8) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::out_of_range("month", 1, 12, month as i32));
        }
        Ok(Self(month))
    }

    /// Returns the month number (1..=12).
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Returns the zero-based slot index (0..=11).
    pub fn index(&self) -> usize {
        (self.0 - 1) as usize
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Twelve monthly quantities, January first.
///
/// Quantities are non-negative; callers round to 2 decimals via [`rounded`]
/// before persisting.
///
/// [`rounded`]: MonthlyQty::rounded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthlyQty([f64; 12]);

impl MonthlyQty {
    /// All-zero series.
    pub fn zero() -> Self {
        Self([0.0; 12])
    }

    /// Creates a series, clamping negative or non-finite slots to zero.
    pub fn from_values(values: [f64; 12]) -> Self {
        let mut clamped = [0.0; 12];
        for (slot, value) in clamped.iter_mut().zip(values.iter()) {
            if value.is_finite() && *value > 0.0 {
                *slot = *value;
            }
        }
        Self(clamped)
    }

    /// Returns the series rounded to 2 decimals, half away from zero.
    pub fn rounded(&self) -> Self {
        let mut out = [0.0; 12];
        for (slot, value) in out.iter_mut().zip(self.0.iter()) {
            *slot = (value * 100.0).round() / 100.0;
        }
        Self(out)
    }

    /// Returns the underlying values.
    pub fn values(&self) -> &[f64; 12] {
        &self.0
    }

    /// Returns the quantity for a month.
    pub fn get(&self, month: Month) -> f64 {
        self.0[month.index()]
    }

    /// Sum of all twelve slots.
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// True when every slot is zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|v| *v == 0.0)
    }
}

impl Default for MonthlyQty {
    fn default() -> Self {
        Self::zero()
    }
}

/// Twelve monthly currency amounts, January first.
///
/// Amounts are integer currency units, already rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthlyAmount([i64; 12]);

impl MonthlyAmount {
    /// All-zero series.
    pub fn zero() -> Self {
        Self([0; 12])
    }

    /// Creates a series, clamping negative slots to zero.
    pub fn from_values(values: [i64; 12]) -> Self {
        let mut clamped = [0; 12];
        for (slot, value) in clamped.iter_mut().zip(values.iter()) {
            *slot = (*value).max(0);
        }
        Self(clamped)
    }

    /// Returns the underlying values.
    pub fn values(&self) -> &[i64; 12] {
        &self.0
    }

    /// Sum of all twelve slots.
    pub fn total(&self) -> i64 {
        self.0.iter().sum()
    }
}

impl Default for MonthlyAmount {
    fn default() -> Self {
        Self::zero()
    }
}
