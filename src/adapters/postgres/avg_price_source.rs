//! PostgreSQL implementation of AvgPriceSource.
//!
//! Average unit prices are aggregated from the invoice line history. The
//! same query shape serves both the assignee scope and the company-wide
//! fallback scope; only the WHERE clause differs.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{AssigneeId, CompanyType, DomainError, ErrorCode};
use crate::domain::pricing::UnitPrice;
use crate::ports::AvgPriceSource;

/// PostgreSQL implementation of AvgPriceSource.
#[derive(Clone)]
pub struct PostgresAvgPriceSource {
    pool: PgPool,
}

impl PostgresAvgPriceSource {
    /// Creates a new PostgresAvgPriceSource.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvgPriceSource for PostgresAvgPriceSource {
    async fn assignee_prices(
        &self,
        company_type: CompanyType,
        assignee_id: &AssigneeId,
        year: i32,
    ) -> Result<Vec<UnitPrice>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT sales_mgmt_unit,
                   SUM(amount) AS total_amount,
                   SUM(qty) AS total_qty,
                   CASE WHEN SUM(qty) > 0 THEN SUM(amount) / SUM(qty) ELSE 0 END AS avg_price,
                   MIN(item_unit) AS item_unit,
                   MIN(item_std_unit) AS item_std_unit
            FROM invoice_actuals
            WHERE company_type = $1 AND assignee_id = $2 AND invoice_year = $3
            GROUP BY sales_mgmt_unit
            ORDER BY sales_mgmt_unit
            "#,
        )
        .bind(company_type.code())
        .bind(assignee_id.as_str())
        .bind(year)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Failed to fetch assignee prices: {}", e)))?;

        Ok(rows.into_iter().map(row_to_unit_price).collect())
    }

    async fn company_prices(
        &self,
        company_type: CompanyType,
        year: i32,
    ) -> Result<Vec<UnitPrice>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT sales_mgmt_unit,
                   SUM(amount) AS total_amount,
                   SUM(qty) AS total_qty,
                   CASE WHEN SUM(qty) > 0 THEN SUM(amount) / SUM(qty) ELSE 0 END AS avg_price,
                   MIN(item_unit) AS item_unit,
                   MIN(item_std_unit) AS item_std_unit
            FROM invoice_actuals
            WHERE company_type = $1 AND invoice_year = $2
            GROUP BY sales_mgmt_unit
            ORDER BY sales_mgmt_unit
            "#,
        )
        .bind(company_type.code())
        .bind(year)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Failed to fetch company prices: {}", e)))?;

        Ok(rows.into_iter().map(row_to_unit_price).collect())
    }
}

fn row_to_unit_price(row: PgRow) -> UnitPrice {
    UnitPrice {
        sales_mgmt_unit: row.get("sales_mgmt_unit"),
        avg_price: row.get("avg_price"),
        total_amount: row.get("total_amount"),
        total_qty: row.get("total_qty"),
        item_unit: row.get("item_unit"),
        item_std_unit: row.get("item_std_unit"),
    }
}
