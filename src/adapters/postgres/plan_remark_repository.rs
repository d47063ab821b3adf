//! PostgreSQL implementation of PlanRemarkRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{AssigneeId, CustomerId, DomainError, ErrorCode, PlanYear};
use crate::ports::PlanRemarkRepository;

/// PostgreSQL implementation of PlanRemarkRepository.
#[derive(Clone)]
pub struct PostgresPlanRemarkRepository {
    pool: PgPool,
}

impl PostgresPlanRemarkRepository {
    /// Creates a new PostgresPlanRemarkRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanRemarkRepository for PostgresPlanRemarkRepository {
    async fn read(
        &self,
        year: PlanYear,
        assignee_id: &AssigneeId,
        customer_id: &CustomerId,
    ) -> Result<Option<String>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT remark
            FROM plan_remarks
            WHERE plan_year = $1 AND assignee_id = $2 AND customer_id = $3
            "#,
        )
        .bind(year.value())
        .bind(assignee_id.as_str())
        .bind(customer_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Failed to fetch remark: {}", e)))?;

        Ok(row.map(|r| r.get("remark")))
    }

    async fn write(
        &self,
        year: PlanYear,
        assignee_id: &AssigneeId,
        customer_id: &CustomerId,
        remark: &str,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO plan_remarks (plan_year, assignee_id, customer_id, remark, updated_at)
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (plan_year, assignee_id, customer_id)
            DO UPDATE SET remark = EXCLUDED.remark, updated_at = NOW()
            "#,
        )
        .bind(year.value())
        .bind(assignee_id.as_str())
        .bind(customer_id.as_str())
        .bind(remark)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Failed to save remark: {}", e)))?;

        Ok(())
    }
}
