//! Per-customer plan status derived from row stages.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::foundation::CustomerId;

use super::row::{PlanRow, PlanType, Stage};

/// Derived status of one customer's yearly plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerPlanStatus {
    Initial,
    Planning,
    Confirmed,
}

impl fmt::Display for CustomerPlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CustomerPlanStatus::Initial => "Initial",
            CustomerPlanStatus::Planning => "Planning",
            CustomerPlanStatus::Confirmed => "Confirmed",
        };
        write!(f, "{}", s)
    }
}

/// Counts of customers by derived status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatusCounts {
    pub total: u32,
    pub confirmed: u32,
    pub in_progress: u32,
}

/// Derives the status of one customer's rows.
///
/// Confirmed iff every row is Confirmed; Planning when any row carries
/// rep-authored values; Initial otherwise. Empty input is Initial.
pub fn customer_status(rows: &[&PlanRow]) -> CustomerPlanStatus {
    if rows.is_empty() {
        return CustomerPlanStatus::Initial;
    }
    if rows.iter().all(|r| r.stage() == Stage::Confirmed) {
        return CustomerPlanStatus::Confirmed;
    }
    if rows
        .iter()
        .any(|r| r.plan_type() == PlanType::Planning || r.stage() == Stage::Planning)
    {
        return CustomerPlanStatus::Planning;
    }
    CustomerPlanStatus::Initial
}

/// Groups rows by customer and derives each customer's status.
pub fn statuses_by_customer(rows: &[PlanRow]) -> BTreeMap<CustomerId, CustomerPlanStatus> {
    let mut grouped: BTreeMap<CustomerId, Vec<&PlanRow>> = BTreeMap::new();
    for row in rows {
        grouped.entry(row.customer_id().clone()).or_default().push(row);
    }
    grouped
        .into_iter()
        .map(|(customer, rows)| {
            let status = customer_status(&rows);
            (customer, status)
        })
        .collect()
}
