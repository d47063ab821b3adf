//! InitBaselineHandler - seed a scope from prior-year invoice actuals.

use std::sync::Arc;

use crate::application::price_resolver::UnitPriceResolver;
use crate::domain::foundation::{
    AssigneeId, CompanyType, DomainError, PlanYear, UpliftPercent, ValidationError,
};
use crate::domain::plan::{MonthlyQty, PlanRow, PlanType, Stage};
use crate::domain::pricing::amounts_for;
use crate::ports::{InvoiceHistoryReader, PlanRowRepository};

/// Command to seed Baseline rows for one (year, company, assignee) scope.
#[derive(Debug, Clone)]
pub struct InitBaselineCommand {
    pub year: PlanYear,
    pub company_type: CompanyType,
    pub assignee_id: AssigneeId,
    pub uplift_percent: UpliftPercent,
}

#[derive(Debug, Clone)]
pub struct InitBaselineResult {
    /// Number of Baseline rows written.
    pub seeded: u32,
}

#[derive(Debug, Clone)]
pub enum InitBaselineError {
    /// The scope already holds Planning or Confirmed rows; seeding would
    /// silently overwrite manual work.
    BaselineRefused,
    Validation(ValidationError),
    Domain(DomainError),
}

impl std::fmt::Display for InitBaselineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InitBaselineError::BaselineRefused => write!(
                f,
                "Scope already contains planning or confirmed rows; baseline seeding refused"
            ),
            InitBaselineError::Validation(err) => write!(f, "{}", err),
            InitBaselineError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for InitBaselineError {}

impl From<DomainError> for InitBaselineError {
    fn from(err: DomainError) -> Self {
        InitBaselineError::Domain(err)
    }
}

impl From<ValidationError> for InitBaselineError {
    fn from(err: ValidationError) -> Self {
        InitBaselineError::Validation(err)
    }
}

/// Handler that turns prior-year actuals into Baseline rows.
pub struct InitBaselineHandler {
    plan_repository: Arc<dyn PlanRowRepository>,
    invoice_history: Arc<dyn InvoiceHistoryReader>,
    price_resolver: Arc<UnitPriceResolver>,
}

impl InitBaselineHandler {
    pub fn new(
        plan_repository: Arc<dyn PlanRowRepository>,
        invoice_history: Arc<dyn InvoiceHistoryReader>,
        price_resolver: Arc<UnitPriceResolver>,
    ) -> Self {
        Self {
            plan_repository,
            invoice_history,
            price_resolver,
        }
    }

    pub async fn handle(
        &self,
        cmd: InitBaselineCommand,
    ) -> Result<InitBaselineResult, InitBaselineError> {
        // Seeding only runs on a scope that is still purely Initial.
        let existing = self
            .plan_repository
            .find_by_scope(cmd.year, cmd.company_type, &cmd.assignee_id)
            .await?;
        let touched = existing
            .iter()
            .any(|row| row.plan_type() == PlanType::Planning || row.stage() != Stage::Initial);
        if touched {
            return Err(InitBaselineError::BaselineRefused);
        }

        let actuals = self
            .invoice_history
            .monthly_actuals(cmd.company_type, &cmd.assignee_id, cmd.year.prev())
            .await?;

        let ratio = cmd.uplift_percent.ratio();
        let mut seeded = 0u32;

        for actual in actuals {
            if actual.qty.is_zero() {
                continue;
            }

            let mut scaled = *actual.qty.values();
            for slot in scaled.iter_mut() {
                *slot *= ratio;
            }
            let qty = MonthlyQty::from_values(scaled).rounded();

            let price = self
                .price_resolver
                .resolve(
                    cmd.company_type,
                    &cmd.assignee_id,
                    &actual.sales_mgmt_unit,
                    cmd.year,
                )
                .await?;
            let amount = amounts_for(&qty, price);

            let row = PlanRow::baseline(
                cmd.year,
                cmd.company_type,
                cmd.assignee_id.clone(),
                actual.customer_id.clone(),
                actual.customer_name.clone(),
                actual.item_subcategory.clone(),
                actual.sales_mgmt_unit.clone(),
                qty,
                amount,
            )?;
            self.plan_repository.upsert(&row).await?;
            seeded += 1;
        }

        Ok(InitBaselineResult { seeded })
    }
}

#[cfg(test)]
mod tests {
    use super::super::upsert_row::test_support::*;
    use super::*;
    use crate::domain::foundation::CustomerId;
    use crate::domain::plan::MonthlyAmount;
    use crate::ports::CustomerUnitActuals;
    use async_trait::async_trait;

    struct MockInvoiceHistory {
        actuals: Vec<CustomerUnitActuals>,
    }

    #[async_trait]
    impl InvoiceHistoryReader for MockInvoiceHistory {
        async fn monthly_actuals(
            &self,
            _company_type: CompanyType,
            _assignee_id: &AssigneeId,
            _year: i32,
        ) -> Result<Vec<CustomerUnitActuals>, DomainError> {
            Ok(self.actuals.clone())
        }
    }

    fn actual(customer: &str, unit: &str, qty: [f64; 12]) -> CustomerUnitActuals {
        CustomerUnitActuals {
            customer_id: CustomerId::new(customer).unwrap(),
            customer_name: Some(format!("{} Corp", customer)),
            item_subcategory: "Frozen".to_string(),
            sales_mgmt_unit: unit.to_string(),
            qty: MonthlyQty::from_values(qty),
        }
    }

    fn command(uplift: f64) -> InitBaselineCommand {
        InitBaselineCommand {
            year: year(),
            company_type: CompanyType::CompanyA,
            assignee_id: rep(),
            uplift_percent: UpliftPercent::try_new(uplift).unwrap(),
        }
    }

    #[tokio::test]
    async fn seeds_baseline_rows_with_uplift() {
        let repo = Arc::new(MockPlanRowRepository::new());
        let history = Arc::new(MockInvoiceHistory {
            actuals: vec![actual("C-1", "CASE", [100.0; 12])],
        });
        let handler = InitBaselineHandler::new(
            repo.clone(),
            history,
            resolver(MockAvgPriceSource::empty()),
        );

        let result = handler.handle(command(10.0)).await.unwrap();

        assert_eq!(result.seeded, 1);
        let rows = repo.stored_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].plan_type(), PlanType::Baseline);
        assert_eq!(rows[0].stage(), Stage::Initial);
        assert_eq!(rows[0].qty().values()[0], 110.0);
    }

    #[tokio::test]
    async fn zero_uplift_copies_actuals_verbatim() {
        let repo = Arc::new(MockPlanRowRepository::new());
        let history = Arc::new(MockInvoiceHistory {
            actuals: vec![actual("C-1", "CASE", [42.5; 12])],
        });
        let handler = InitBaselineHandler::new(
            repo.clone(),
            history,
            resolver(MockAvgPriceSource::empty()),
        );

        handler.handle(command(0.0)).await.unwrap();

        assert_eq!(repo.stored_rows()[0].qty().values()[0], 42.5);
    }

    #[tokio::test]
    async fn zero_qty_actuals_are_skipped() {
        let repo = Arc::new(MockPlanRowRepository::new());
        let history = Arc::new(MockInvoiceHistory {
            actuals: vec![
                actual("C-1", "CASE", [0.0; 12]),
                actual("C-2", "CASE", [5.0; 12]),
            ],
        });
        let handler = InitBaselineHandler::new(
            repo.clone(),
            history,
            resolver(MockAvgPriceSource::empty()),
        );

        let result = handler.handle(command(0.0)).await.unwrap();

        assert_eq!(result.seeded, 1);
        assert_eq!(
            repo.stored_rows()[0].customer_id().as_str(),
            "C-2"
        );
    }

    #[tokio::test]
    async fn seeds_amounts_from_resolved_price() {
        let repo = Arc::new(MockPlanRowRepository::new());
        let history = Arc::new(MockInvoiceHistory {
            actuals: vec![actual("C-1", "CASE", [10.0; 12])],
        });
        let handler = InitBaselineHandler::new(
            repo.clone(),
            history,
            resolver(MockAvgPriceSource::company_price("CASE", 500.0)),
        );

        handler.handle(command(0.0)).await.unwrap();

        let rows = repo.stored_rows();
        assert_eq!(rows[0].amount().values(), &[5000; 12]);
        assert_ne!(rows[0].amount(), &MonthlyAmount::zero());
    }

    #[tokio::test]
    async fn refuses_when_scope_has_planning_rows() {
        let planning = PlanRow::planning(
            year(),
            CompanyType::CompanyA,
            rep(),
            CustomerId::new("C-9").unwrap(),
            None,
            "Frozen",
            "CASE",
            MonthlyQty::from_values([1.0; 12]),
            MonthlyAmount::zero(),
        )
        .unwrap();
        let repo = Arc::new(MockPlanRowRepository::with_rows(vec![planning]));
        let history = Arc::new(MockInvoiceHistory {
            actuals: vec![actual("C-1", "CASE", [10.0; 12])],
        });
        let handler = InitBaselineHandler::new(
            repo.clone(),
            history,
            resolver(MockAvgPriceSource::empty()),
        );

        let result = handler.handle(command(0.0)).await;

        assert!(matches!(result, Err(InitBaselineError::BaselineRefused)));
        assert_eq!(repo.stored_rows().len(), 1);
    }

    #[tokio::test]
    async fn empty_history_seeds_nothing() {
        let repo = Arc::new(MockPlanRowRepository::new());
        let history = Arc::new(MockInvoiceHistory { actuals: vec![] });
        let handler = InitBaselineHandler::new(
            repo.clone(),
            history,
            resolver(MockAvgPriceSource::empty()),
        );

        let result = handler.handle(command(15.0)).await.unwrap();

        assert_eq!(result.seeded, 0);
        assert!(repo.stored_rows().is_empty());
    }
}
