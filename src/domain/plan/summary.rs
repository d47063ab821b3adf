//! Aggregation projections over plan rows.
//!
//! All projections are pure functions over a row slice loaded by the caller;
//! they read whatever stage mix exists at the moment they run. Because upsert
//! is a full replace there is never a Baseline/Planning duplicate for the same
//! key, so totals are plain sums.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::foundation::CompanyType;

use super::row::PlanRow;
use super::status::{statuses_by_customer, CustomerPlanStatus, StatusCounts};

/// Grouping axis for [`breakdown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Customer,
    Unit,
}

/// One line of a grouped total, sorted largest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownEntry {
    /// Grouping key (customer id or unit label).
    pub key: String,
    /// Display label (customer name where known, otherwise the key).
    pub label: String,
    /// Summed yearly amount.
    pub amount: i64,
}

/// Yearly amount totals per company.
pub fn totals_by_company(rows: &[PlanRow]) -> BTreeMap<CompanyType, i64> {
    let mut totals = BTreeMap::new();
    for row in rows {
        *totals.entry(row.company_type()).or_insert(0) += row.amount().total();
    }
    totals
}

/// Yearly amount totals per company, counting only customers whose every
/// row (within that company) is Confirmed.
pub fn confirmed_totals_by_company(rows: &[PlanRow]) -> BTreeMap<CompanyType, i64> {
    let mut by_company: BTreeMap<CompanyType, Vec<&PlanRow>> = BTreeMap::new();
    for row in rows {
        by_company.entry(row.company_type()).or_default().push(row);
    }

    let mut totals = BTreeMap::new();
    for (company, company_rows) in by_company {
        let owned: Vec<PlanRow> = company_rows.iter().map(|r| (*r).clone()).collect();
        let statuses = statuses_by_customer(&owned);
        let confirmed_total: i64 = owned
            .iter()
            .filter(|row| statuses[row.customer_id()] == CustomerPlanStatus::Confirmed)
            .map(|row| row.amount().total())
            .sum();
        totals.insert(company, confirmed_total);
    }
    totals
}

/// Groups rows by customer or unit and sums yearly amounts.
///
/// Sorted by amount descending, key ascending for equal amounts so output
/// is deterministic.
pub fn breakdown(rows: &[PlanRow], group_by: GroupBy) -> Vec<BreakdownEntry> {
    let mut grouped: BTreeMap<String, (String, i64)> = BTreeMap::new();
    for row in rows {
        let (key, label) = match group_by {
            GroupBy::Customer => (
                row.customer_id().as_str().to_string(),
                row.customer_name()
                    .unwrap_or(row.customer_id().as_str())
                    .to_string(),
            ),
            GroupBy::Unit => (
                row.sales_mgmt_unit().to_string(),
                row.sales_mgmt_unit().to_string(),
            ),
        };
        let entry = grouped.entry(key).or_insert((label, 0));
        entry.1 += row.amount().total();
    }

    let mut entries: Vec<BreakdownEntry> = grouped
        .into_iter()
        .map(|(key, (label, amount))| BreakdownEntry { key, label, amount })
        .collect();
    entries.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.key.cmp(&b.key)));
    entries
}

/// Counts customers by derived status.
pub fn customer_status_counts(rows: &[PlanRow]) -> StatusCounts {
    let statuses = statuses_by_customer(rows);
    let mut counts = StatusCounts::default();
    for status in statuses.values() {
        counts.total += 1;
        match status {
            CustomerPlanStatus::Confirmed => counts.confirmed += 1,
            CustomerPlanStatus::Planning => counts.in_progress += 1,
            CustomerPlanStatus::Initial => {}
        }
    }
    counts
}
