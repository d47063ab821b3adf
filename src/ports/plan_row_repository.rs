//! Plan row repository port.
//!
//! Defines the contract for persisting and retrieving PlanRow aggregates.
//! The logical key is the six-part (year, company, assignee, customer,
//! subcategory, unit) tuple; `upsert` is always a full replace on that key.

use async_trait::async_trait;
use crate::domain::foundation::{AssigneeId, CompanyType, CustomerId, DomainError, PlanYear};
use crate::domain::plan::PlanRow;

/// Repository port for PlanRow persistence.
#[async_trait]
pub trait PlanRowRepository: Send + Sync {
    /// Inserts or fully replaces the row with the same logical key.
    ///
    /// Idempotent: the same row twice leaves exactly one stored row.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn upsert(&self, row: &PlanRow) -> Result<(), DomainError>;

    /// All rows for one customer within (year, company, assignee).
    async fn find_by_customer(
        &self,
        year: PlanYear,
        company_type: CompanyType,
        assignee_id: &AssigneeId,
        customer_id: &CustomerId,
    ) -> Result<Vec<PlanRow>, DomainError>;

    /// All rows in one (year, company, assignee) scope.
    async fn find_by_scope(
        &self,
        year: PlanYear,
        company_type: CompanyType,
        assignee_id: &AssigneeId,
    ) -> Result<Vec<PlanRow>, DomainError>;

    /// All rows for an assignee across both companies.
    async fn find_by_assignee(
        &self,
        year: PlanYear,
        assignee_id: &AssigneeId,
    ) -> Result<Vec<PlanRow>, DomainError>;

    /// Marks every matching row Confirmed in one atomic step and returns
    /// the affected row count (0 when nothing matched).
    ///
    /// `company_type: None` confirms the customer across both companies.
    /// Implementations must guarantee all-or-nothing: a failure leaves no
    /// row confirmed.
    async fn confirm_customer(
        &self,
        year: PlanYear,
        company_type: Option<CompanyType>,
        assignee_id: &AssigneeId,
        customer_id: &CustomerId,
    ) -> Result<u64, DomainError>;
}
