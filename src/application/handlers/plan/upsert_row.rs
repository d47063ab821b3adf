//! UpsertPlanRowHandler - single-row plan entry (the core write path).

use std::sync::Arc;

use crate::application::price_resolver::UnitPriceResolver;
use crate::domain::foundation::{
    AssigneeId, CompanyType, CustomerId, DomainError, PlanYear, ValidationError,
};
use crate::domain::plan::{distribute, Month, MonthlyAmount, MonthlyQty, PlanRow, Stage};
use crate::domain::pricing::amounts_for;
use crate::ports::PlanRowRepository;

/// How the monthly quantity curve is supplied.
#[derive(Debug, Clone)]
pub enum QtyInput {
    /// Spread a yearly total evenly from `start_month` to December.
    Distribute { start_month: u8, total_qty: f64 },
    /// Twelve explicit monthly quantities.
    Explicit { qty: [f64; 12] },
}

/// Command to create or fully replace one plan row.
#[derive(Debug, Clone)]
pub struct UpsertPlanRowCommand {
    pub year: PlanYear,
    pub company_type: CompanyType,
    pub assignee_id: AssigneeId,
    pub customer_id: CustomerId,
    pub customer_name: Option<String>,
    pub item_subcategory: String,
    pub sales_mgmt_unit: String,
    pub input: QtyInput,
    /// Caller-supplied amounts; when absent, amounts are computed from the
    /// resolved unit price.
    pub explicit_amount: Option<[i64; 12]>,
    /// Allow editing a Confirmed row by returning it to Planning first.
    pub reopen: bool,
}

/// Result of a successful upsert.
#[derive(Debug, Clone)]
pub struct UpsertPlanRowResult {
    pub row: PlanRow,
    /// True when no row existed for the key before this command.
    pub created: bool,
}

/// Error type for single-row upserts.
#[derive(Debug, Clone)]
pub enum UpsertPlanRowError {
    /// Invalid input (bad month, empty subcategory/unit, ...).
    Validation(ValidationError),
    /// The row is Confirmed and `reopen` was not set.
    ConfirmedRow { sales_mgmt_unit: String },
    /// Domain or infrastructure error.
    Domain(DomainError),
}

impl std::fmt::Display for UpsertPlanRowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpsertPlanRowError::Validation(err) => write!(f, "{}", err),
            UpsertPlanRowError::ConfirmedRow { sales_mgmt_unit } => write!(
                f,
                "Row for unit '{}' is confirmed; set reopen to edit it",
                sales_mgmt_unit
            ),
            UpsertPlanRowError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for UpsertPlanRowError {}

impl From<DomainError> for UpsertPlanRowError {
    fn from(err: DomainError) -> Self {
        UpsertPlanRowError::Domain(err)
    }
}

impl From<ValidationError> for UpsertPlanRowError {
    fn from(err: ValidationError) -> Self {
        UpsertPlanRowError::Validation(err)
    }
}

/// Handler for single-row plan upserts.
pub struct UpsertPlanRowHandler {
    plan_repository: Arc<dyn PlanRowRepository>,
    price_resolver: Arc<UnitPriceResolver>,
}

impl UpsertPlanRowHandler {
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
        cmd: UpsertPlanRowCommand,
    ) -> Result<UpsertPlanRowResult, UpsertPlanRowError> {
        let item_subcategory = cmd.item_subcategory.trim().to_string();
        if item_subcategory.is_empty() {
            return Err(ValidationError::empty_field("item_subcategory").into());
        }
        let sales_mgmt_unit = cmd.sales_mgmt_unit.trim().to_string();
        if sales_mgmt_unit.is_empty() {
            return Err(ValidationError::empty_field("sales_mgmt_unit").into());
        }

        // 1. Build the quantity curve. A month must be selected for the
        //    distribute path; total_qty <= 0 is a legitimate all-zero save.
        let qty = match &cmd.input {
            QtyInput::Distribute {
                start_month,
                total_qty,
            } => {
                let month = Month::try_new(*start_month)?;
                distribute(month, *total_qty)
            }
            QtyInput::Explicit { qty } => MonthlyQty::from_values(*qty),
        };
        let qty = qty.rounded();

        // 2. Resolve the unit price and compute amounts.
        let amount = match cmd.explicit_amount {
            Some(values) => MonthlyAmount::from_values(values),
            None => {
                let price = self
                    .price_resolver
                    .resolve(cmd.company_type, &cmd.assignee_id, &sales_mgmt_unit, cmd.year)
                    .await?;
                amounts_for(&qty, price)
            }
        };

        // 3. Full replace: mutate the existing row for the key or create a
        //    new Planning row.
        let existing = self
            .plan_repository
            .find_by_customer(cmd.year, cmd.company_type, &cmd.assignee_id, &cmd.customer_id)
            .await?;

        let matched = existing.into_iter().find(|row| {
            row.item_subcategory() == item_subcategory && row.sales_mgmt_unit() == sales_mgmt_unit
        });

        let (row, created) = match matched {
            Some(mut row) => {
                if row.stage() == Stage::Confirmed {
                    if cmd.reopen {
                        row.reopen();
                    } else {
                        return Err(UpsertPlanRowError::ConfirmedRow { sales_mgmt_unit });
                    }
                }
                row.replace_values(qty, amount)?;
                (row, false)
            }
            None => {
                let row = PlanRow::planning(
                    cmd.year,
                    cmd.company_type,
                    cmd.assignee_id.clone(),
                    cmd.customer_id.clone(),
                    cmd.customer_name.clone(),
                    item_subcategory,
                    sales_mgmt_unit,
                    qty,
                    amount,
                )?;
                (row, true)
            }
        };

        self.plan_repository.upsert(&row).await?;

        Ok(UpsertPlanRowResult { row, created })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! In-memory mocks shared by the plan handler tests.

    use super::*;
    use crate::domain::plan::PlanRowKey;
    use crate::domain::pricing::UnitPrice;
    use crate::ports::AvgPriceSource;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    pub struct MockPlanRowRepository {
        rows: Mutex<HashMap<PlanRowKey, PlanRow>>,
        pub fail_upsert: bool,
    }

    impl MockPlanRowRepository {
        pub fn new() -> Self {
            Self {
                rows: Mutex::new(HashMap::new()),
                fail_upsert: false,
            }
        }

        pub fn with_rows(rows: Vec<PlanRow>) -> Self {
            let map = rows.into_iter().map(|r| (r.key(), r)).collect();
            Self {
                rows: Mutex::new(map),
                fail_upsert: false,
            }
        }

        pub fn failing() -> Self {
            Self {
                rows: Mutex::new(HashMap::new()),
                fail_upsert: true,
            }
        }

        pub fn stored_rows(&self) -> Vec<PlanRow> {
            self.rows.lock().unwrap().values().cloned().collect()
        }
    }

    #[async_trait]
    impl PlanRowRepository for MockPlanRowRepository {
        async fn upsert(&self, row: &PlanRow) -> Result<(), DomainError> {
            if self.fail_upsert {
                return Err(DomainError::new(
                    crate::domain::foundation::ErrorCode::DatabaseError,
                    "Simulated upsert failure",
                ));
            }
            self.rows.lock().unwrap().insert(row.key(), row.clone());
            Ok(())
        }

        async fn find_by_customer(
            &self,
            year: PlanYear,
            company_type: CompanyType,
            assignee_id: &AssigneeId,
            customer_id: &CustomerId,
        ) -> Result<Vec<PlanRow>, DomainError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .filter(|r| {
                    r.year() == year
                        && r.company_type() == company_type
                        && r.assignee_id() == assignee_id
                        && r.customer_id() == customer_id
                })
                .cloned()
                .collect())
        }

        async fn find_by_scope(
            &self,
            year: PlanYear,
            company_type: CompanyType,
            assignee_id: &AssigneeId,
        ) -> Result<Vec<PlanRow>, DomainError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .filter(|r| {
                    r.year() == year
                        && r.company_type() == company_type
                        && r.assignee_id() == assignee_id
                })
                .cloned()
                .collect())
        }

        async fn find_by_assignee(
            &self,
            year: PlanYear,
            assignee_id: &AssigneeId,
        ) -> Result<Vec<PlanRow>, DomainError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .filter(|r| r.year() == year && r.assignee_id() == assignee_id)
                .cloned()
                .collect())
        }

        async fn confirm_customer(
            &self,
            year: PlanYear,
            company_type: Option<CompanyType>,
            assignee_id: &AssigneeId,
            customer_id: &CustomerId,
        ) -> Result<u64, DomainError> {
            let mut rows = self.rows.lock().unwrap();
            let mut count = 0;
            for row in rows.values_mut() {
                let matches = row.year() == year
                    && row.assignee_id() == assignee_id
                    && row.customer_id() == customer_id
                    && company_type.map_or(true, |c| row.company_type() == c);
                if matches {
                    row.confirm();
                    count += 1;
                }
            }
            Ok(count)
        }
    }

    pub struct MockAvgPriceSource {
        pub assignee: Vec<UnitPrice>,
        pub company: Vec<UnitPrice>,
    }

    impl MockAvgPriceSource {
        pub fn empty() -> Self {
            Self {
                assignee: vec![],
                company: vec![],
            }
        }

        pub fn company_price(unit: &str, avg: f64) -> Self {
            Self {
                assignee: vec![],
                company: vec![UnitPrice {
                    sales_mgmt_unit: unit.to_string(),
                    avg_price: avg,
                    total_amount: avg * 10.0,
                    total_qty: 10.0,
                    item_unit: None,
                    item_std_unit: None,
                }],
            }
        }
    }

    #[async_trait]
    impl AvgPriceSource for MockAvgPriceSource {
        async fn assignee_prices(
            &self,
            _company_type: CompanyType,
            _assignee_id: &AssigneeId,
            _year: i32,
        ) -> Result<Vec<UnitPrice>, DomainError> {
            Ok(self.assignee.clone())
        }

        async fn company_prices(
            &self,
            _company_type: CompanyType,
            _year: i32,
        ) -> Result<Vec<UnitPrice>, DomainError> {
            Ok(self.company.clone())
        }
    }

    pub fn resolver(source: MockAvgPriceSource) -> Arc<UnitPriceResolver> {
        Arc::new(UnitPriceResolver::new(Arc::new(source)))
    }

    pub fn year() -> PlanYear {
        PlanYear::try_new(2026).unwrap()
    }

    pub fn rep() -> AssigneeId {
        AssigneeId::new("rep-1").unwrap()
    }

    pub fn customer() -> CustomerId {
        CustomerId::new("C-1").unwrap()
    }
}
