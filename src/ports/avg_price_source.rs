//! Historical average price source port.

use async_trait::async_trait;

use crate::domain::foundation::{AssigneeId, CompanyType, DomainError};
use crate::domain::pricing::UnitPrice;

/// Source of per-unit average prices computed from invoice history.
///
/// Both queries aggregate invoice lines of a single year by sales
/// management unit: `avg_price = sum(amount) / sum(qty)` where qty > 0.
#[async_trait]
pub trait AvgPriceSource: Send + Sync {
    /// Averages over one assignee's invoices.
    async fn assignee_prices(
        &self,
        company_type: CompanyType,
        assignee_id: &AssigneeId,
        year: i32,
    ) -> Result<Vec<UnitPrice>, DomainError>;

    /// Company-wide averages (the fallback scope).
    async fn company_prices(
        &self,
        company_type: CompanyType,
        year: i32,
    ) -> Result<Vec<UnitPrice>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avg_price_source_is_object_safe() {
        fn _accepts_dyn(_source: &dyn AvgPriceSource) {}
    }
}
