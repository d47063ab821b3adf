//! In-memory plan remark repository.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{AssigneeId, CustomerId, DomainError, PlanYear};
use crate::ports::PlanRemarkRepository;

type RemarkKey = (i32, String, String);

#[derive(Default)]
pub struct InMemoryPlanRemarkRepository {
    remarks: RwLock<HashMap<RemarkKey, String>>,
}

impl InMemoryPlanRemarkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(year: PlanYear, assignee_id: &AssigneeId, customer_id: &CustomerId) -> RemarkKey {
        (
            year.value(),
            assignee_id.as_str().to_string(),
            customer_id.as_str().to_string(),
        )
    }
}

#[async_trait]
impl PlanRemarkRepository for InMemoryPlanRemarkRepository {
    async fn read(
        &self,
        year: PlanYear,
        assignee_id: &AssigneeId,
        customer_id: &CustomerId,
    ) -> Result<Option<String>, DomainError> {
        Ok(self
            .remarks
            .read()
            .await
            .get(&Self::key(year, assignee_id, customer_id))
            .cloned())
    }

    async fn write(
        &self,
        year: PlanYear,
        assignee_id: &AssigneeId,
        customer_id: &CustomerId,
        remark: &str,
    ) -> Result<(), DomainError> {
        self.remarks
            .write()
            .await
            .insert(Self::key(year, assignee_id, customer_id), remark.to_string());
        Ok(())
    }
}
