//! In-memory average price source.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{AssigneeId, CompanyType, DomainError};
use crate::domain::pricing::UnitPrice;
use crate::ports::AvgPriceSource;

type AssigneeKey = (CompanyType, String, i32);
type CompanyKey = (CompanyType, i32);

#[derive(Default)]
pub struct InMemoryAvgPriceSource {
    assignee: RwLock<HashMap<AssigneeKey, Vec<UnitPrice>>>,
    company: RwLock<HashMap<CompanyKey, Vec<UnitPrice>>>,
}

impl InMemoryAvgPriceSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_assignee_prices(
        &self,
        company_type: CompanyType,
        assignee_id: &AssigneeId,
        year: i32,
        prices: Vec<UnitPrice>,
    ) {
        self.assignee
            .write()
            .await
            .insert((company_type, assignee_id.as_str().to_string(), year), prices);
    }

    pub async fn set_company_prices(
        &self,
        company_type: CompanyType,
        year: i32,
        prices: Vec<UnitPrice>,
    ) {
        self.company.write().await.insert((company_type, year), prices);
    }
}

#[async_trait]
impl AvgPriceSource for InMemoryAvgPriceSource {
    async fn assignee_prices(
        &self,
        company_type: CompanyType,
        assignee_id: &AssigneeId,
        year: i32,
    ) -> Result<Vec<UnitPrice>, DomainError> {
        Ok(self
            .assignee
            .read()
            .await
            .get(&(company_type, assignee_id.as_str().to_string(), year))
            .cloned()
            .unwrap_or_default())
    }

    async fn company_prices(
        &self,
        company_type: CompanyType,
        year: i32,
    ) -> Result<Vec<UnitPrice>, DomainError> {
        Ok(self
            .company
            .read()
            .await
            .get(&(company_type, year))
            .cloned()
            .unwrap_or_default())
    }
}
