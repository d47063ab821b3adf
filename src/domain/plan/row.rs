//! PlanRow aggregate - one planned (customer, subcategory, unit) line.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{
    AssigneeId, CompanyType, CustomerId, DomainError, ErrorCode, PlanRowId, PlanYear, Timestamp,
    ValidationError,
};

use super::monthly::{MonthlyAmount, MonthlyQty};

/// Origin of a plan row's current values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanType {
    /// Seeded from prior-year actuals, untouched by a rep.
    Baseline,
    /// Edited or created by a sales rep.
    Planning,
}

/// Lifecycle stage of a plan row.
///
/// Stored explicitly per row; never inferred from sibling rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Initial,
    Planning,
    Confirmed,
}

impl Stage {
    /// Returns true if the row can be edited without reopening.
    pub fn is_editable(&self) -> bool {
        !matches!(self, Stage::Confirmed)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Initial => "Initial",
            Stage::Planning => "Planning",
            Stage::Confirmed => "Confirmed",
        };
        write!(f, "{}", s)
    }
}

/// The six-part logical key identifying a plan row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlanRowKey {
    pub year: PlanYear,
    pub company_type: CompanyType,
    pub assignee_id: AssigneeId,
    pub customer_id: CustomerId,
    pub item_subcategory: String,
    pub sales_mgmt_unit: String,
}

/// One planned line: a yearly quantity curve and its amounts for a
/// (customer, item subcategory, sales management unit) combination.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRow {
    id: PlanRowId,
    year: PlanYear,
    company_type: CompanyType,
    assignee_id: AssigneeId,
    customer_id: CustomerId,
    customer_name: Option<String>,
    item_subcategory: String,
    sales_mgmt_unit: String,
    qty: MonthlyQty,
    amount: MonthlyAmount,
    plan_type: PlanType,
    stage: Stage,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl PlanRow {
    /// Creates a baseline row (stage Initial) from prior-year actuals.
    #[allow(clippy::too_many_arguments)]
    pub fn baseline(
        year: PlanYear,
        company_type: CompanyType,
        assignee_id: AssigneeId,
        customer_id: CustomerId,
        customer_name: Option<String>,
        item_subcategory: impl Into<String>,
        sales_mgmt_unit: impl Into<String>,
        qty: MonthlyQty,
        amount: MonthlyAmount,
    ) -> Result<Self, ValidationError> {
        Self::build(
            year,
            company_type,
            assignee_id,
            customer_id,
            customer_name,
            item_subcategory.into(),
            sales_mgmt_unit.into(),
            qty,
            amount,
            PlanType::Baseline,
            Stage::Initial,
        )
    }

    /// Creates a rep-authored row (stage Planning).
    #[allow(clippy::too_many_arguments)]
    pub fn planning(
        year: PlanYear,
        company_type: CompanyType,
        assignee_id: AssigneeId,
        customer_id: CustomerId,
        customer_name: Option<String>,
        item_subcategory: impl Into<String>,
        sales_mgmt_unit: impl Into<String>,
        qty: MonthlyQty,
        amount: MonthlyAmount,
    ) -> Result<Self, ValidationError> {
        Self::build(
            year,
            company_type,
            assignee_id,
            customer_id,
            customer_name,
            item_subcategory.into(),
            sales_mgmt_unit.into(),
            qty,
            amount,
            PlanType::Planning,
            Stage::Planning,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn build(
        year: PlanYear,
        company_type: CompanyType,
        assignee_id: AssigneeId,
        customer_id: CustomerId,
        customer_name: Option<String>,
        item_subcategory: String,
        sales_mgmt_unit: String,
        qty: MonthlyQty,
        amount: MonthlyAmount,
        plan_type: PlanType,
        stage: Stage,
    ) -> Result<Self, ValidationError> {
        let item_subcategory = item_subcategory.trim().to_string();
        if item_subcategory.is_empty() {
            return Err(ValidationError::empty_field("item_subcategory"));
        }
        let sales_mgmt_unit = sales_mgmt_unit.trim().to_string();
        if sales_mgmt_unit.is_empty() {
            return Err(ValidationError::empty_field("sales_mgmt_unit"));
        }

        let now = Timestamp::now();
        Ok(Self {
            id: PlanRowId::new(),
            year,
            company_type,
            assignee_id,
            customer_id,
            customer_name,
            item_subcategory,
            sales_mgmt_unit,
            qty: qty.rounded(),
            amount,
            plan_type,
            stage,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuilds a row from persisted state without validation.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: PlanRowId,
        year: PlanYear,
        company_type: CompanyType,
        assignee_id: AssigneeId,
        customer_id: CustomerId,
        customer_name: Option<String>,
        item_subcategory: String,
        sales_mgmt_unit: String,
        qty: MonthlyQty,
        amount: MonthlyAmount,
        plan_type: PlanType,
        stage: Stage,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            year,
            company_type,
            assignee_id,
            customer_id,
            customer_name,
            item_subcategory,
            sales_mgmt_unit,
            qty,
            amount,
            plan_type,
            stage,
            created_at,
            updated_at,
        }
    }

    /// Replaces both monthly series with newly computed values.
    ///
    /// Advances Initial rows to Planning and flips the plan type to
    /// Planning. A Confirmed row refuses the edit; callers must call
    /// [`reopen`] first.
    ///
    /// [`reopen`]: PlanRow::reopen
    pub fn replace_values(
        &mut self,
        qty: MonthlyQty,
        amount: MonthlyAmount,
    ) -> Result<(), DomainError> {
        if self.stage == Stage::Confirmed {
            return Err(DomainError::new(
                ErrorCode::StageRefusal,
                format!(
                    "Row for unit '{}' is confirmed and cannot be edited without reopening",
                    self.sales_mgmt_unit
                ),
            )
            .with_detail("unit", self.sales_mgmt_unit.clone()));
        }

        self.qty = qty.rounded();
        self.amount = amount;
        self.plan_type = PlanType::Planning;
        self.stage = Stage::Planning;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Returns a Confirmed row to Planning so it can be edited again.
    ///
    /// No-op for rows that are not confirmed.
    pub fn reopen(&mut self) {
        if self.stage == Stage::Confirmed {
            self.stage = Stage::Planning;
            self.updated_at = Timestamp::now();
        }
    }

    /// Marks the row Confirmed. Only the confirm-customer operation calls
    /// this; individual rows are never confirmed one at a time.
    pub fn confirm(&mut self) {
        self.stage = Stage::Confirmed;
        self.updated_at = Timestamp::now();
    }

    /// Returns the logical key.
    pub fn key(&self) -> PlanRowKey {
        PlanRowKey {
            year: self.year,
            company_type: self.company_type,
            assignee_id: self.assignee_id.clone(),
            customer_id: self.customer_id.clone(),
            item_subcategory: self.item_subcategory.clone(),
            sales_mgmt_unit: self.sales_mgmt_unit.clone(),
        }
    }

    pub fn id(&self) -> PlanRowId {
        self.id
    }

    pub fn year(&self) -> PlanYear {
        self.year
    }

    pub fn company_type(&self) -> CompanyType {
        self.company_type
    }

    pub fn assignee_id(&self) -> &AssigneeId {
        &self.assignee_id
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    pub fn customer_name(&self) -> Option<&str> {
        self.customer_name.as_deref()
    }

    pub fn item_subcategory(&self) -> &str {
        &self.item_subcategory
    }

    pub fn sales_mgmt_unit(&self) -> &str {
        &self.sales_mgmt_unit
    }

    pub fn qty(&self) -> &MonthlyQty {
        &self.qty
    }

    pub fn amount(&self) -> &MonthlyAmount {
        &self.amount
    }

    pub fn plan_type(&self) -> PlanType {
        self.plan_type
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}
