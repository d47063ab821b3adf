//! PostgreSQL implementation of InvoiceHistoryReader.
//!
//! Invoice lines carry an invoice month; here they are folded into one
//! twelve-slot quantity series per (customer, subcategory, unit).

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{AssigneeId, CompanyType, CustomerId, DomainError, ErrorCode};
use crate::domain::plan::MonthlyQty;
use crate::ports::{CustomerUnitActuals, InvoiceHistoryReader};

/// PostgreSQL implementation of InvoiceHistoryReader.
#[derive(Clone)]
pub struct PostgresInvoiceHistoryReader {
    pool: PgPool,
}

impl PostgresInvoiceHistoryReader {
    /// Creates a new PostgresInvoiceHistoryReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvoiceHistoryReader for PostgresInvoiceHistoryReader {
    async fn monthly_actuals(
        &self,
        company_type: CompanyType,
        assignee_id: &AssigneeId,
        year: i32,
    ) -> Result<Vec<CustomerUnitActuals>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT customer_id,
                   MIN(customer_name) AS customer_name,
                   item_subcategory,
                   sales_mgmt_unit,
                   invoice_month,
                   SUM(qty) AS month_qty
            FROM invoice_actuals
            WHERE company_type = $1 AND assignee_id = $2 AND invoice_year = $3
            GROUP BY customer_id, item_subcategory, sales_mgmt_unit, invoice_month
            ORDER BY customer_id, item_subcategory, sales_mgmt_unit, invoice_month
            "#,
        )
        .bind(company_type.code())
        .bind(assignee_id.as_str())
        .bind(year)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Failed to fetch invoice actuals: {}", e)))?;

        // Rows arrive sorted by key, so the fold just watches for key changes.
        let mut actuals: Vec<CustomerUnitActuals> = Vec::new();
        let mut current: Option<(String, String, String, Option<String>, [f64; 12])> = None;

        for row in rows {
            let customer_id: String = row.get("customer_id");
            let customer_name: Option<String> = row.get("customer_name");
            let item_subcategory: String = row.get("item_subcategory");
            let sales_mgmt_unit: String = row.get("sales_mgmt_unit");
            let invoice_month: i32 = row.get("invoice_month");
            let month_qty: f64 = row.get("month_qty");

            let same_key = current.as_ref().map_or(false, |(c, s, u, _, _)| {
                *c == customer_id && *s == item_subcategory && *u == sales_mgmt_unit
            });
            if !same_key {
                if let Some(group) = current.take() {
                    actuals.push(group_to_actuals(group)?);
                }
                current = Some((
                    customer_id,
                    item_subcategory,
                    sales_mgmt_unit,
                    customer_name,
                    [0.0; 12],
                ));
            }

            if let Some((_, _, _, _, qty)) = current.as_mut() {
                if (1..=12).contains(&invoice_month) {
                    qty[(invoice_month - 1) as usize] += month_qty;
                }
            }
        }
        if let Some(group) = current.take() {
            actuals.push(group_to_actuals(group)?);
        }

        Ok(actuals)
    }
}

fn group_to_actuals(
    group: (String, String, String, Option<String>, [f64; 12]),
) -> Result<CustomerUnitActuals, DomainError> {
    let (customer_id, item_subcategory, sales_mgmt_unit, customer_name, qty) = group;
    let customer_id = CustomerId::new(customer_id)
        .map_err(|e| DomainError::new(ErrorCode::InternalError, format!("Corrupt customer_id: {}", e)))?;
    Ok(CustomerUnitActuals {
        customer_id,
        customer_name,
        item_subcategory,
        sales_mgmt_unit,
        qty: MonthlyQty::from_values(qty),
    })
}
