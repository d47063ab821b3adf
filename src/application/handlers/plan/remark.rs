//! Plan remark handlers - read and write the free-text note per customer.

use std::sync::Arc;

use crate::domain::foundation::{
    AssigneeId, CustomerId, DomainError, PlanYear, ValidationError,
};
use crate::ports::{PlanRemarkRepository, PlanRowRepository};

const REMARK_MAX_CHARS: usize = 2000;

#[derive(Debug, Clone)]
pub struct GetPlanRemarkQuery {
    pub year: PlanYear,
    pub assignee_id: AssigneeId,
    pub customer_id: CustomerId,
}

#[derive(Debug, Clone)]
pub struct GetPlanRemarkResult {
    pub remark: Option<String>,
}

pub struct GetPlanRemarkHandler {
    remark_repository: Arc<dyn PlanRemarkRepository>,
}

impl GetPlanRemarkHandler {
    pub fn new(remark_repository: Arc<dyn PlanRemarkRepository>) -> Self {
        Self { remark_repository }
    }

    pub async fn handle(
        &self,
        query: GetPlanRemarkQuery,
    ) -> Result<GetPlanRemarkResult, DomainError> {
        let remark = self
            .remark_repository
            .read(query.year, &query.assignee_id, &query.customer_id)
            .await?;
        Ok(GetPlanRemarkResult { remark })
    }
}

#[derive(Debug, Clone)]
pub struct SavePlanRemarkCommand {
    pub year: PlanYear,
    pub assignee_id: AssigneeId,
    pub customer_id: CustomerId,
    pub remark: String,
}

#[derive(Debug, Clone)]
pub enum SavePlanRemarkError {
    /// Remarks attach to an existing plan; the customer has no rows.
    CustomerPlanNotFound,
    Validation(ValidationError),
    Domain(DomainError),
}

impl std::fmt::Display for SavePlanRemarkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SavePlanRemarkError::CustomerPlanNotFound => {
                write!(f, "Customer has no plan rows to attach a remark to")
            }
            SavePlanRemarkError::Validation(err) => write!(f, "{}", err),
            SavePlanRemarkError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SavePlanRemarkError {}

impl From<DomainError> for SavePlanRemarkError {
    fn from(err: DomainError) -> Self {
        SavePlanRemarkError::Domain(err)
    }
}

impl From<ValidationError> for SavePlanRemarkError {
    fn from(err: ValidationError) -> Self {
        SavePlanRemarkError::Validation(err)
    }
}

pub struct SavePlanRemarkHandler {
    remark_repository: Arc<dyn PlanRemarkRepository>,
    plan_repository: Arc<dyn PlanRowRepository>,
}

impl SavePlanRemarkHandler {
    pub fn new(
        remark_repository: Arc<dyn PlanRemarkRepository>,
        plan_repository: Arc<dyn PlanRowRepository>,
    ) -> Self {
        Self {
            remark_repository,
            plan_repository,
        }
    }

    pub async fn handle(&self, cmd: SavePlanRemarkCommand) -> Result<(), SavePlanRemarkError> {
        let remark = cmd.remark.trim();
        let len = remark.chars().count();
        if len > REMARK_MAX_CHARS {
            return Err(
                ValidationError::out_of_range("remark", 0, REMARK_MAX_CHARS as i32, len as i32)
                    .into(),
            );
        }

        // Remarks span both companies, so the existence check does too.
        let rows = self
            .plan_repository
            .find_by_assignee(cmd.year, &cmd.assignee_id)
            .await?;
        let has_plan = rows.iter().any(|r| r.customer_id() == &cmd.customer_id);
        if !has_plan {
            return Err(SavePlanRemarkError::CustomerPlanNotFound);
        }

        self.remark_repository
            .write(cmd.year, &cmd.assignee_id, &cmd.customer_id, remark)
            .await?;
        Ok(())
    }
}
