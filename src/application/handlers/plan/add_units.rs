//! AddPlanUnitsHandler - attach new (subcategory, unit) rows to a customer.

use std::sync::Arc;

use crate::application::price_resolver::UnitPriceResolver;
use crate::domain::foundation::{
    AssigneeId, CompanyType, CustomerId, DomainError, PlanYear, ValidationError,
};
use crate::domain::plan::{distribute, find_conflicts, Month, PlanRow, UnitPair};
use crate::domain::pricing::amounts_for;
use crate::ports::PlanRowRepository;

/// One unit to add.
#[derive(Debug, Clone)]
pub struct NewUnitItem {
    pub item_subcategory: String,
    pub sales_mgmt_unit: String,
    pub start_month: u8,
    pub total_qty: f64,
}

/// Command to add a batch of new plan units for one customer. The batch is
/// checked against existing rows first; any collision rejects the whole
/// request before anything is written.
#[derive(Debug, Clone)]
pub struct AddPlanUnitsCommand {
    pub year: PlanYear,
    pub company_type: CompanyType,
    pub assignee_id: AssigneeId,
    pub customer_id: CustomerId,
    pub customer_name: Option<String>,
    pub items: Vec<NewUnitItem>,
}

#[derive(Debug, Clone)]
pub struct AddPlanUnitsResult {
    pub added: u32,
}

#[derive(Debug, Clone)]
pub enum AddPlanUnitsError {
    /// Units that already exist for the customer, by label.
    DuplicateUnits(Vec<String>),
    Validation(ValidationError),
    Domain(DomainError),
}

impl std::fmt::Display for AddPlanUnitsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddPlanUnitsError::DuplicateUnits(units) => {
                write!(f, "Units already planned: {}", units.join(", "))
            }
            AddPlanUnitsError::Validation(err) => write!(f, "{}", err),
            AddPlanUnitsError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AddPlanUnitsError {}

impl From<DomainError> for AddPlanUnitsError {
    fn from(err: DomainError) -> Self {
        AddPlanUnitsError::Domain(err)
    }
}

impl From<ValidationError> for AddPlanUnitsError {
    fn from(err: ValidationError) -> Self {
        AddPlanUnitsError::Validation(err)
    }
}

pub struct AddPlanUnitsHandler {
    plan_repository: Arc<dyn PlanRowRepository>,
    price_resolver: Arc<UnitPriceResolver>,
}

impl AddPlanUnitsHandler {
    pub fn new(
        plan_repository: Arc<dyn PlanRowRepository>,
        price_resolver: Arc<UnitPriceResolver>,
    ) -> Self {
        Self {
            plan_repository,
            price_resolver,
        }
    }

    pub async fn handle(
        &self,
        cmd: AddPlanUnitsCommand,
    ) -> Result<AddPlanUnitsResult, AddPlanUnitsError> {
        if cmd.items.is_empty() {
            return Ok(AddPlanUnitsResult { added: 0 });
        }

        // Validate the batch and check months before touching storage.
        let mut candidates = Vec::with_capacity(cmd.items.len());
        for item in &cmd.items {
            let subcategory = item.item_subcategory.trim();
            if subcategory.is_empty() {
                return Err(ValidationError::empty_field("item_subcategory").into());
            }
            let unit = item.sales_mgmt_unit.trim();
            if unit.is_empty() {
                return Err(ValidationError::empty_field("sales_mgmt_unit").into());
            }
            Month::try_new(item.start_month)?;
            candidates.push(UnitPair::new(subcategory, unit));
        }

        let existing = self
            .plan_repository
            .find_by_customer(cmd.year, cmd.company_type, &cmd.assignee_id, &cmd.customer_id)
            .await?;

        let conflicts = find_conflicts(&existing, &candidates);
        if !conflicts.is_empty() {
            return Err(AddPlanUnitsError::DuplicateUnits(conflicts));
        }

        let mut added = 0u32;
        for item in cmd.items {
            let month = Month::try_new(item.start_month)?;
            let qty = distribute(month, item.total_qty).rounded();
            let price = self
                .price_resolver
                .resolve(
                    cmd.company_type,
                    &cmd.assignee_id,
                    item.sales_mgmt_unit.trim(),
                    cmd.year,
                )
                .await?;
            let amount = amounts_for(&qty, price);

            let row = PlanRow::planning(
                cmd.year,
                cmd.company_type,
                cmd.assignee_id.clone(),
                cmd.customer_id.clone(),
                cmd.customer_name.clone(),
                item.item_subcategory,
                item.sales_mgmt_unit,
                qty,
                amount,
            )?;
            self.plan_repository.upsert(&row).await?;
            added += 1;
        }

        Ok(AddPlanUnitsResult { added })
    }
}

#[cfg(test)]
mod tests {
    use super::super::upsert_row::test_support::*;
    use super::*;
    use crate::domain::plan::{MonthlyAmount, MonthlyQty};

    fn item(subcategory: &str, unit: &str) -> NewUnitItem {
        NewUnitItem {
            item_subcategory: subcategory.to_string(),
            sales_mgmt_unit: unit.to_string(),
            start_month: 4,
            total_qty: 90.0,
        }
    }

    fn command(items: Vec<NewUnitItem>) -> AddPlanUnitsCommand {
        AddPlanUnitsCommand {
            year: year(),
            company_type: CompanyType::CompanyA,
            assignee_id: rep(),
            customer_id: customer(),
            customer_name: Some("Acme Foods".to_string()),
            items,
        }
    }

    fn existing_row(subcategory: &str, unit: &str) -> PlanRow {
        PlanRow::planning(
            year(),
            CompanyType::CompanyA,
            rep(),
            customer(),
            None,
            subcategory,
            unit,
            MonthlyQty::from_values([1.0; 12]),
            MonthlyAmount::zero(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn adds_new_units_with_distributed_quantities() {
        let repo = Arc::new(MockPlanRowRepository::new());
        let handler = AddPlanUnitsHandler::new(repo.clone(), resolver(MockAvgPriceSource::empty()));

        let result = handler
            .handle(command(vec![item("Frozen", "CASE"), item("Chilled", "BOX")]))
            .await
            .unwrap();

        assert_eq!(result.added, 2);
        let rows = repo.stored_rows();
        assert_eq!(rows.len(), 2);
        // 90 over Apr..Dec = 10 per month
        assert_eq!(rows[0].qty().values()[3], 10.0);
        assert_eq!(rows[0].qty().values()[0], 0.0);
    }

    #[tokio::test]
    async fn rejects_whole_batch_on_any_conflict() {
        let repo = Arc::new(MockPlanRowRepository::with_rows(vec![existing_row(
            "Frozen", "CASE",
        )]));
        let handler = AddPlanUnitsHandler::new(repo.clone(), resolver(MockAvgPriceSource::empty()));

        let result = handler
            .handle(command(vec![item("Chilled", "BOX"), item("Frozen", "CASE")]))
            .await;

        match result {
            Err(AddPlanUnitsError::DuplicateUnits(units)) => {
                assert_eq!(units, vec!["CASE".to_string()]);
            }
            other => panic!("expected DuplicateUnits, got {:?}", other.map(|r| r.added)),
        }
        // Nothing was written, not even the non-conflicting row.
        assert_eq!(repo.stored_rows().len(), 1);
    }

    #[tokio::test]
    async fn same_unit_under_different_subcategory_is_allowed() {
        let repo = Arc::new(MockPlanRowRepository::with_rows(vec![existing_row(
            "Frozen", "CASE",
        )]));
        let handler = AddPlanUnitsHandler::new(repo.clone(), resolver(MockAvgPriceSource::empty()));

        let result = handler
            .handle(command(vec![item("Chilled", "CASE")]))
            .await
            .unwrap();

        assert_eq!(result.added, 1);
        assert_eq!(repo.stored_rows().len(), 2);
    }

    #[tokio::test]
    async fn invalid_month_rejects_before_any_write() {
        let repo = Arc::new(MockPlanRowRepository::new());
        let handler = AddPlanUnitsHandler::new(repo.clone(), resolver(MockAvgPriceSource::empty()));

        let mut bad = item("Frozen", "CASE");
        bad.start_month = 0;
        let result = handler
            .handle(command(vec![item("Chilled", "BOX"), bad]))
            .await;

        assert!(matches!(result, Err(AddPlanUnitsError::Validation(_))));
        assert!(repo.stored_rows().is_empty());
    }

    #[tokio::test]
    async fn empty_batch_is_a_no_op() {
        let repo = Arc::new(MockPlanRowRepository::new());
        let handler = AddPlanUnitsHandler::new(repo.clone(), resolver(MockAvgPriceSource::empty()));

        let result = handler.handle(command(vec![])).await.unwrap();

        assert_eq!(result.added, 0);
        assert!(repo.stored_rows().is_empty());
    }
}
