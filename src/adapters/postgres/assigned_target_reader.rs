//! PostgreSQL implementation of AssignedTargetReader.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{CompanyType, DomainError, ErrorCode};
use crate::domain::target::AssignedTarget;
use crate::ports::AssignedTargetReader;

/// PostgreSQL implementation of AssignedTargetReader.
#[derive(Clone)]
pub struct PostgresAssignedTargetReader {
    pool: PgPool,
}

impl PostgresAssignedTargetReader {
    /// Creates a new PostgresAssignedTargetReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssignedTargetReader for PostgresAssignedTargetReader {
    async fn find(
        &self,
        year: i32,
        employee_name: &str,
    ) -> Result<Vec<AssignedTarget>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT target_year, company_type, employee_name, assigned_amount, stage
            FROM assigned_targets
            WHERE target_year = $1 AND employee_name = $2
            ORDER BY company_type
            "#,
        )
        .bind(year)
        .bind(employee_name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Failed to fetch assigned targets: {}", e)))?;

        rows.into_iter()
            .map(|row| {
                let company_type = CompanyType::from_code(row.get::<&str, _>("company_type"))
                    .map_err(|e| {
                        DomainError::new(
                            ErrorCode::InternalError,
                            format!("Corrupt company_type: {}", e),
                        )
                    })?;
                Ok(AssignedTarget {
                    year: row.get("target_year"),
                    company_type,
                    employee_name: row.get("employee_name"),
                    assigned_amount: row.get("assigned_amount"),
                    stage: row.get("stage"),
                })
            })
            .collect()
    }
}
