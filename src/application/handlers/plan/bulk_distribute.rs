//! BulkDistributeHandler - apply the distribute shortcut to many rows.

use std::sync::Arc;

use crate::application::handlers::plan::upsert_row::{
    QtyInput, UpsertPlanRowCommand, UpsertPlanRowError, UpsertPlanRowHandler,
};
use crate::application::price_resolver::UnitPriceResolver;
use crate::domain::foundation::{AssigneeId, CompanyType, CustomerId, PlanYear};
use crate::ports::PlanRowRepository;

/// One row of a bulk distribution request.
#[derive(Debug, Clone)]
pub struct BulkDistributeRow {
    pub item_subcategory: String,
    pub sales_mgmt_unit: String,
    pub start_month: u8,
    pub total_qty: f64,
}

/// Command to distribute yearly totals across several rows of one customer.
#[derive(Debug, Clone)]
pub struct BulkDistributeCommand {
    pub year: PlanYear,
    pub company_type: CompanyType,
    pub assignee_id: AssigneeId,
    pub customer_id: CustomerId,
    pub customer_name: Option<String>,
    pub rows: Vec<BulkDistributeRow>,
}

#[derive(Debug, Clone)]
pub struct BulkDistributeResult {
    /// Number of rows written.
    pub applied: u32,
}

/// Bulk application is row-by-row without rollback; a failure reports how
/// many rows already landed.
#[derive(Debug)]
pub enum BulkDistributeError {
    RowFailed {
        applied: u32,
        sales_mgmt_unit: String,
        source: UpsertPlanRowError,
    },
}

impl std::fmt::Display for BulkDistributeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BulkDistributeError::RowFailed {
                applied,
                sales_mgmt_unit,
                source,
            } => write!(
                f,
                "Distribution stopped at unit '{}' after {} row(s): {}",
                sales_mgmt_unit, applied, source
            ),
        }
    }
}

impl std::error::Error for BulkDistributeError {}

pub struct BulkDistributeHandler {
    upsert: UpsertPlanRowHandler,
}

impl BulkDistributeHandler {
    pub fn new(
        plan_repository: Arc<dyn PlanRowRepository>,
        price_resolver: Arc<UnitPriceResolver>,
    ) -> Self {
        Self {
            upsert: UpsertPlanRowHandler::new(plan_repository, price_resolver),
        }
    }

    pub async fn handle(
        &self,
        cmd: BulkDistributeCommand,
    ) -> Result<BulkDistributeResult, BulkDistributeError> {
        let mut applied = 0u32;

        for row in cmd.rows {
            let unit = row.sales_mgmt_unit.clone();
            let result = self
                .upsert
                .handle(UpsertPlanRowCommand {
                    year: cmd.year,
                    company_type: cmd.company_type,
                    assignee_id: cmd.assignee_id.clone(),
                    customer_id: cmd.customer_id.clone(),
                    customer_name: cmd.customer_name.clone(),
                    item_subcategory: row.item_subcategory,
                    sales_mgmt_unit: row.sales_mgmt_unit,
                    input: QtyInput::Distribute {
                        start_month: row.start_month,
                        total_qty: row.total_qty,
                    },
                    explicit_amount: None,
                    reopen: false,
                })
                .await;

            match result {
                Ok(_) => applied += 1,
                Err(source) => {
                    return Err(BulkDistributeError::RowFailed {
                        applied,
                        sales_mgmt_unit: unit,
                        source,
                    })
                }
            }
        }

        Ok(BulkDistributeResult { applied })
    }
}

#[cfg(test)]
mod tests {
    use super::super::upsert_row::test_support::*;
    use super::*;

    fn command(rows: Vec<BulkDistributeRow>) -> BulkDistributeCommand {
        BulkDistributeCommand {
            year: year(),
            company_type: CompanyType::CompanyA,
            assignee_id: rep(),
            customer_id: customer(),
            customer_name: Some("Acme Foods".to_string()),
            rows,
        }
    }

    fn row(unit: &str, start_month: u8, total_qty: f64) -> BulkDistributeRow {
        BulkDistributeRow {
            item_subcategory: "Frozen".to_string(),
            sales_mgmt_unit: unit.to_string(),
            start_month,
            total_qty,
        }
    }

    #[tokio::test]
    async fn distributes_every_row() {
        let repo = Arc::new(MockPlanRowRepository::new());
        let handler =
            BulkDistributeHandler::new(repo.clone(), resolver(MockAvgPriceSource::empty()));

        let result = handler
            .handle(command(vec![
                row("CASE", 1, 120.0),
                row("PALLET", 7, 60.0),
            ]))
            .await
            .unwrap();

        assert_eq!(result.applied, 2);
        let rows = repo.stored_rows();
        assert_eq!(rows.len(), 2);
        let pallet = rows
            .iter()
            .find(|r| r.sales_mgmt_unit() == "PALLET")
            .unwrap();
        assert_eq!(pallet.qty().values()[6], 10.0);
        assert_eq!(pallet.qty().values()[0], 0.0);
    }

    #[tokio::test]
    async fn stops_at_first_invalid_row_and_reports_progress() {
        let repo = Arc::new(MockPlanRowRepository::new());
        let handler =
            BulkDistributeHandler::new(repo.clone(), resolver(MockAvgPriceSource::empty()));

        let result = handler
            .handle(command(vec![
                row("CASE", 1, 120.0),
                row("PALLET", 13, 60.0),
                row("BOX", 2, 24.0),
            ]))
            .await;

        match result {
            Err(BulkDistributeError::RowFailed {
                applied,
                sales_mgmt_unit,
                ..
            }) => {
                assert_eq!(applied, 1);
                assert_eq!(sales_mgmt_unit, "PALLET");
            }
            other => panic!("expected RowFailed, got {:?}", other.map(|r| r.applied)),
        }
        // The first row landed; nothing after the failure did.
        assert_eq!(repo.stored_rows().len(), 1);
    }

    #[tokio::test]
    async fn empty_request_applies_nothing() {
        let repo = Arc::new(MockPlanRowRepository::new());
        let handler =
            BulkDistributeHandler::new(repo.clone(), resolver(MockAvgPriceSource::empty()));

        let result = handler.handle(command(vec![])).await.unwrap();

        assert_eq!(result.applied, 0);
        assert!(repo.stored_rows().is_empty());
    }
}
