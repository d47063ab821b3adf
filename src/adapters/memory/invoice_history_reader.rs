//! In-memory invoice history reader.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{AssigneeId, CompanyType, DomainError};
use crate::ports::{CustomerUnitActuals, InvoiceHistoryReader};

type ScopeKey = (CompanyType, String, i32);

#[derive(Default)]
pub struct InMemoryInvoiceHistoryReader {
    actuals: RwLock<HashMap<ScopeKey, Vec<CustomerUnitActuals>>>,
}

impl InMemoryInvoiceHistoryReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_actuals(
        &self,
        company_type: CompanyType,
        assignee_id: &AssigneeId,
        year: i32,
        actuals: Vec<CustomerUnitActuals>,
    ) {
        self.actuals
            .write()
            .await
            .insert((company_type, assignee_id.as_str().to_string(), year), actuals);
    }
}

#[async_trait]
impl InvoiceHistoryReader for InMemoryInvoiceHistoryReader {
    async fn monthly_actuals(
        &self,
        company_type: CompanyType,
        assignee_id: &AssigneeId,
        year: i32,
    ) -> Result<Vec<CustomerUnitActuals>, DomainError> {
        Ok(self
            .actuals
            .read()
            .await
            .get(&(company_type, assignee_id.as_str().to_string(), year))
            .cloned()
            .unwrap_or_default())
    }
}
