//! In-memory plan row repository.
//!
//! Backs integration tests and local development without PostgreSQL. The
//! map is keyed by the six-part plan key, so an upsert of an existing key
//! replaces the stored row just like the SQL adapter does.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{AssigneeId, CompanyType, CustomerId, DomainError, PlanYear};
use crate::domain::plan::{PlanRow, PlanRowKey};
use crate::ports::PlanRowRepository;

#[derive(Default)]
pub struct InMemoryPlanRowRepository {
    rows: RwLock<HashMap<PlanRowKey, PlanRow>>,
}

impl InMemoryPlanRowRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlanRowRepository for InMemoryPlanRowRepository {
    async fn upsert(&self, row: &PlanRow) -> Result<(), DomainError> {
        self.rows.write().await.insert(row.key(), row.clone());
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
            .read()
            .await
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
            .read()
            .await
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
            .read()
            .await
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
        // Single write lock makes the flip all-or-nothing, matching the
        // one-statement UPDATE of the SQL adapter.
        let mut rows = self.rows.write().await;
        let mut count = 0u64;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::plan::{MonthlyAmount, MonthlyQty, Stage};

    fn row(company: CompanyType, customer: &str, unit: &str) -> PlanRow {
        PlanRow::planning(
            PlanYear::try_new(2026).unwrap(),
            company,
            AssigneeId::new("rep-1").unwrap(),
            CustomerId::new(customer).unwrap(),
            None,
            "Frozen",
            unit,
            MonthlyQty::from_values([1.0; 12]),
            MonthlyAmount::zero(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn upsert_replaces_rows_with_the_same_key() {
        let repo = InMemoryPlanRowRepository::new();
        let first = row(CompanyType::CompanyA, "C-1", "CASE");
        let mut second = first.clone();
        second
            .replace_values(MonthlyQty::from_values([9.0; 12]), MonthlyAmount::zero())
            .unwrap();

        repo.upsert(&first).await.unwrap();
        repo.upsert(&second).await.unwrap();

        let found = repo
            .find_by_customer(
                first.year(),
                CompanyType::CompanyA,
                first.assignee_id(),
                first.customer_id(),
            )
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].qty().values()[0], 9.0);
    }

    #[tokio::test]
    async fn scope_queries_filter_by_company() {
        let repo = InMemoryPlanRowRepository::new();
        repo.upsert(&row(CompanyType::CompanyA, "C-1", "CASE"))
            .await
            .unwrap();
        repo.upsert(&row(CompanyType::CompanyB, "C-1", "CASE"))
            .await
            .unwrap();

        let year = PlanYear::try_new(2026).unwrap();
        let rep = AssigneeId::new("rep-1").unwrap();
        let scoped = repo
            .find_by_scope(year, CompanyType::CompanyA, &rep)
            .await
            .unwrap();
        assert_eq!(scoped.len(), 1);

        let all = repo.find_by_assignee(year, &rep).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn confirm_flips_matching_rows_only() {
        let repo = InMemoryPlanRowRepository::new();
        repo.upsert(&row(CompanyType::CompanyA, "C-1", "CASE"))
            .await
            .unwrap();
        repo.upsert(&row(CompanyType::CompanyA, "C-2", "CASE"))
            .await
            .unwrap();

        let year = PlanYear::try_new(2026).unwrap();
        let rep = AssigneeId::new("rep-1").unwrap();
        let customer = CustomerId::new("C-1").unwrap();
        let count = repo
            .confirm_customer(year, None, &rep, &customer)
            .await
            .unwrap();

        assert_eq!(count, 1);
        let c1 = repo
            .find_by_customer(year, CompanyType::CompanyA, &rep, &customer)
            .await
            .unwrap();
        assert_eq!(c1[0].stage(), Stage::Confirmed);
        let c2 = repo
            .find_by_customer(
                year,
                CompanyType::CompanyA,
                &rep,
                &CustomerId::new("C-2").unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(c2[0].stage(), Stage::Planning);
    }
}
