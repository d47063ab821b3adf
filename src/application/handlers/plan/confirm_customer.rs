//! ConfirmCustomerHandler - lock in a customer's plan in one shot.

use std::sync::Arc;

use crate::domain::foundation::{AssigneeId, CompanyType, CustomerId, DomainError, PlanYear};
use crate::ports::PlanRowRepository;

/// Command to confirm every row of one customer. `company_type: None`
/// confirms across both companies.
#[derive(Debug, Clone)]
pub struct ConfirmCustomerCommand {
    pub year: PlanYear,
    pub company_type: Option<CompanyType>,
    pub assignee_id: AssigneeId,
    pub customer_id: CustomerId,
}

#[derive(Debug, Clone)]
pub struct ConfirmCustomerResult {
    /// Rows moved to Confirmed (already-confirmed rows count too).
    pub confirmed: u64,
}

#[derive(Debug, Clone)]
pub enum ConfirmCustomerError {
    /// The customer has no plan rows in the scope.
    NothingToConfirm,
    Domain(DomainError),
}

impl std::fmt::Display for ConfirmCustomerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfirmCustomerError::NothingToConfirm => {
                write!(f, "No plan rows found to confirm for this customer")
            }
            ConfirmCustomerError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ConfirmCustomerError {}

impl From<DomainError> for ConfirmCustomerError {
    fn from(err: DomainError) -> Self {
        ConfirmCustomerError::Domain(err)
    }
}

pub struct ConfirmCustomerHandler {
    plan_repository: Arc<dyn PlanRowRepository>,
}

impl ConfirmCustomerHandler {
    pub fn new(plan_repository: Arc<dyn PlanRowRepository>) -> Self {
        Self { plan_repository }
    }

    pub async fn handle(
        &self,
        cmd: ConfirmCustomerCommand,
    ) -> Result<ConfirmCustomerResult, ConfirmCustomerError> {
        // The repository flips every matching row in a single statement, so
        // a customer can never end up half-confirmed.
        let confirmed = self
            .plan_repository
            .confirm_customer(cmd.year, cmd.company_type, &cmd.assignee_id, &cmd.customer_id)
            .await?;

        if confirmed == 0 {
            return Err(ConfirmCustomerError::NothingToConfirm);
        }

        Ok(ConfirmCustomerResult { confirmed })
    }
}
