//! Duplicate-pair detection for new-unit additions.

use std::collections::HashSet;

use super::row::PlanRow;

/// A candidate (item subcategory, sales management unit) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnitPair {
    pub item_subcategory: String,
    pub sales_mgmt_unit: String,
}

impl UnitPair {
    pub fn new(item_subcategory: impl Into<String>, sales_mgmt_unit: impl Into<String>) -> Self {
        Self {
            item_subcategory: item_subcategory.into(),
            sales_mgmt_unit: sales_mgmt_unit.into(),
        }
    }
}

/// Returns the unit labels of candidates that collide with an existing row.
///
/// Comparison is exact on the (subcategory, unit) pair; the caller has
/// already scoped `existing` to one (year, company, customer). A non-empty
/// result means the whole candidate batch must be rejected.
pub fn find_conflicts(existing: &[PlanRow], candidates: &[UnitPair]) -> Vec<String> {
    let taken: HashSet<(&str, &str)> = existing
        .iter()
        .map(|row| (row.item_subcategory(), row.sales_mgmt_unit()))
        .collect();

    candidates
        .iter()
        .filter(|pair| {
            taken.contains(&(pair.item_subcategory.as_str(), pair.sales_mgmt_unit.as_str()))
        })
        .map(|pair| pair.sales_mgmt_unit.clone())
        .collect()
}
