//! Plan remark repository port.

use async_trait::async_trait;

use crate::domain::foundation::{AssigneeId, CustomerId, DomainError, PlanYear};

/// Free-text remark attached to one (year, assignee, customer) plan.
#[async_trait]
pub trait PlanRemarkRepository: Send + Sync {
    /// Reads the remark; `None` when none was saved.
    async fn read(
        &self,
        year: PlanYear,
        assignee_id: &AssigneeId,
        customer_id: &CustomerId,
    ) -> Result<Option<String>, DomainError>;

    /// Writes (or replaces) the remark.
    async fn write(
        &self,
        year: PlanYear,
        assignee_id: &AssigneeId,
        customer_id: &CustomerId,
        remark: &str,
    ) -> Result<(), DomainError>;
}
