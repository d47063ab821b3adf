//! Unit price vocabulary: historical averages and amount computation.

use serde::Serialize;

use crate::domain::foundation::{AssigneeId, CompanyType};
use crate::domain::plan::{MonthlyAmount, MonthlyQty};

/// Historical average price for one sales management unit.
///
/// Computed from invoice actuals of a single year; `item_unit` and
/// `item_std_unit` are descriptive labels carried through from the invoice
/// lines for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitPrice {
    pub sales_mgmt_unit: String,
    pub avg_price: f64,
    pub total_amount: f64,
    pub total_qty: f64,
    pub item_unit: Option<String>,
    pub item_std_unit: Option<String>,
}

/// Cache key for one fetched price map.
///
/// `assignee: None` is the company-wide scope used as fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PriceScope {
    pub company_type: CompanyType,
    pub assignee: Option<AssigneeId>,
    pub year: i32,
}

/// Canonical form of a unit label for price lookups: trimmed, uppercased.
pub fn normalize_unit(unit: &str) -> String {
    unit.trim().to_uppercase()
}

/// Computes monthly amounts from a quantity curve and a resolved price.
///
/// Each slot is `round(qty × price)`; a missing or non-positive price
/// yields all-zero amounts.
pub fn amounts_for(qty: &MonthlyQty, price: Option<i64>) -> MonthlyAmount {
    let price = match price {
        Some(p) if p > 0 => p,
        _ => return MonthlyAmount::zero(),
    };

    let mut values = [0i64; 12];
    for (slot, q) in values.iter_mut().zip(qty.values().iter()) {
        *slot = (q * price as f64).round() as i64;
    }
    MonthlyAmount::from_values(values)
}
