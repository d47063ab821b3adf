//! Invoice history reader port (baseline seeding input).

use async_trait::async_trait;

use crate::domain::foundation::{AssigneeId, CompanyType, CustomerId, DomainError};
use crate::domain::plan::MonthlyQty;

/// Actual invoiced quantities of one (customer, subcategory, unit) over
/// twelve months of a single year.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerUnitActuals {
    pub customer_id: CustomerId,
    pub customer_name: Option<String>,
    pub item_subcategory: String,
    pub sales_mgmt_unit: String,
    pub qty: MonthlyQty,
}

/// Read access to invoiced quantities, grouped for baseline seeding.
#[async_trait]
pub trait InvoiceHistoryReader: Send + Sync {
    /// Monthly invoiced quantities for every customer/unit the assignee
    /// sold in `year`, within one company.
    async fn monthly_actuals(
        &self,
        company_type: CompanyType,
        assignee_id: &AssigneeId,
        year: i32,
    ) -> Result<Vec<CustomerUnitActuals>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoice_history_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn InvoiceHistoryReader) {}
    }
}
