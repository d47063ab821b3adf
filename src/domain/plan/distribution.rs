//! Monthly distribution calculator and ratio applicator.
//!
//! Pure arithmetic over [`MonthlyQty`] series. Results are unrounded; the
//! 2-decimal rounding happens once, at persistence time.

use crate::domain::foundation::RatioPercent;

use super::monthly::{Month, MonthlyQty};

/// Spreads a yearly quantity evenly across the months from `start_month`
/// to December.
///
/// A non-positive (or non-finite) total yields the all-zero series.
pub fn distribute(start_month: Month, total_qty: f64) -> MonthlyQty {
    if !total_qty.is_finite() || total_qty <= 0.0 {
        return MonthlyQty::zero();
    }

    let count = 12 - start_month.number() as usize + 1;
    let per_month = total_qty / count as f64;

    let mut values = [0.0; 12];
    for slot in values.iter_mut().skip(start_month.index()) {
        *slot = per_month;
    }
    MonthlyQty::from_values(values)
}

/// Raw-input variant of [`distribute`] for unvalidated month numbers.
///
/// A start month outside 1..=12 yields the all-zero series instead of an
/// error, matching how blank form input is treated in bulk entry.
pub fn distribute_raw(start_month: u8, total_qty: f64) -> MonthlyQty {
    match Month::try_new(start_month) {
        Ok(month) => distribute(month, total_qty),
        Err(_) => MonthlyQty::zero(),
    }
}

/// Scales an existing monthly curve by `1 + percent/100`, clamped at zero.
///
/// Always applied to the persisted curve, never to an intermediate result,
/// so repeated adjustments do not compound silently.
pub fn apply_ratio(current: &MonthlyQty, percent: RatioPercent) -> MonthlyQty {
    let ratio = percent.ratio();
    let mut values = [0.0; 12];
    for (slot, value) in values.iter_mut().zip(current.values().iter()) {
        *slot = value * ratio;
    }
    MonthlyQty::from_values(values)
}
