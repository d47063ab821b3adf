//! PostgreSQL implementation of PlanRowRepository.
//!
//! Plan rows are stored one per (year, company, assignee, customer,
//! subcategory, unit) key, with the twelve monthly series as array columns.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    AssigneeId, CompanyType, CustomerId, DomainError, ErrorCode, PlanRowId, PlanYear, Timestamp,
};
use crate::domain::plan::{MonthlyAmount, MonthlyQty, PlanRow, PlanType, Stage};
use crate::ports::PlanRowRepository;

/// PostgreSQL implementation of PlanRowRepository.
#[derive(Clone)]
pub struct PostgresPlanRowRepository {
    pool: PgPool,
}

impl PostgresPlanRowRepository {
    /// Creates a new PostgresPlanRowRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, plan_year, company_type, assignee_id, customer_id, customer_name,
           item_subcategory, sales_mgmt_unit, qty, amount, plan_type, stage,
           created_at, updated_at
    FROM plan_rows
"#;

#[async_trait]
impl PlanRowRepository for PostgresPlanRowRepository {
    async fn upsert(&self, row: &PlanRow) -> Result<(), DomainError> {
        // Single statement keyed on the six-part unique index, so concurrent
        // saves of the same row cannot produce duplicates.
        sqlx::query(
            r#"
            INSERT INTO plan_rows (
                id, plan_year, company_type, assignee_id, customer_id, customer_name,
                item_subcategory, sales_mgmt_unit, qty, amount, plan_type, stage,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ON CONFLICT (plan_year, company_type, assignee_id, customer_id,
                         item_subcategory, sales_mgmt_unit)
            DO UPDATE SET
                customer_name = EXCLUDED.customer_name,
                qty = EXCLUDED.qty,
                amount = EXCLUDED.amount,
                plan_type = EXCLUDED.plan_type,
                stage = EXCLUDED.stage,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(*row.id().as_uuid())
        .bind(row.year().value())
        .bind(row.company_type().code())
        .bind(row.assignee_id().as_str())
        .bind(row.customer_id().as_str())
        .bind(row.customer_name())
        .bind(row.item_subcategory())
        .bind(row.sales_mgmt_unit())
        .bind(row.qty().values().to_vec())
        .bind(row.amount().values().to_vec())
        .bind(plan_type_to_str(row.plan_type()))
        .bind(stage_to_str(row.stage()))
        .bind(*row.created_at().as_datetime())
        .bind(*row.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Failed to upsert plan row: {}", e)))?;

        Ok(())
    }

    async fn find_by_customer(
        &self,
        year: PlanYear,
        company_type: CompanyType,
        assignee_id: &AssigneeId,
        customer_id: &CustomerId,
    ) -> Result<Vec<PlanRow>, DomainError> {
        let rows = sqlx::query(&format!(
            r#"{}
            WHERE plan_year = $1 AND company_type = $2
              AND assignee_id = $3 AND customer_id = $4
            ORDER BY item_subcategory, sales_mgmt_unit
            "#,
            SELECT_COLUMNS
        ))
        .bind(year.value())
        .bind(company_type.code())
        .bind(assignee_id.as_str())
        .bind(customer_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Failed to fetch plan rows: {}", e)))?;

        rows.into_iter().map(row_to_plan_row).collect()
    }

    async fn find_by_scope(
        &self,
        year: PlanYear,
        company_type: CompanyType,
        assignee_id: &AssigneeId,
    ) -> Result<Vec<PlanRow>, DomainError> {
        let rows = sqlx::query(&format!(
            r#"{}
            WHERE plan_year = $1 AND company_type = $2 AND assignee_id = $3
            ORDER BY customer_id, item_subcategory, sales_mgmt_unit
            "#,
            SELECT_COLUMNS
        ))
        .bind(year.value())
        .bind(company_type.code())
        .bind(assignee_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Failed to fetch plan rows: {}", e)))?;

        rows.into_iter().map(row_to_plan_row).collect()
    }

    async fn find_by_assignee(
        &self,
        year: PlanYear,
        assignee_id: &AssigneeId,
    ) -> Result<Vec<PlanRow>, DomainError> {
        let rows = sqlx::query(&format!(
            r#"{}
            WHERE plan_year = $1 AND assignee_id = $2
            ORDER BY company_type, customer_id, item_subcategory, sales_mgmt_unit
            "#,
            SELECT_COLUMNS
        ))
        .bind(year.value())
        .bind(assignee_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Failed to fetch plan rows: {}", e)))?;

        rows.into_iter().map(row_to_plan_row).collect()
    }

    async fn confirm_customer(
        &self,
        year: PlanYear,
        company_type: Option<CompanyType>,
        assignee_id: &AssigneeId,
        customer_id: &CustomerId,
    ) -> Result<u64, DomainError> {
        // One UPDATE flips every matching row, so a customer is never left
        // half-confirmed.
        let result = sqlx::query(
            r#"
            UPDATE plan_rows SET
                stage = 'confirmed',
                updated_at = NOW()
            WHERE plan_year = $1 AND assignee_id = $2 AND customer_id = $3
              AND ($4::text IS NULL OR company_type = $4)
            "#,
        )
        .bind(year.value())
        .bind(assignee_id.as_str())
        .bind(customer_id.as_str())
        .bind(company_type.map(|c| c.code()))
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Failed to confirm plan rows: {}", e)))?;

        Ok(result.rows_affected())
    }
}

fn row_to_plan_row(row: PgRow) -> Result<PlanRow, DomainError> {
    let qty: Vec<f64> = row.get("qty");
    let amount: Vec<i64> = row.get("amount");

    let year = PlanYear::try_new(row.get("plan_year"))
        .map_err(|e| DomainError::new(ErrorCode::InternalError, format!("Corrupt plan_year: {}", e)))?;
    let company_type = CompanyType::from_code(row.get::<&str, _>("company_type"))
        .map_err(|e| DomainError::new(ErrorCode::InternalError, format!("Corrupt company_type: {}", e)))?;
    let assignee_id = AssigneeId::new(row.get::<String, _>("assignee_id"))
        .map_err(|e| DomainError::new(ErrorCode::InternalError, format!("Corrupt assignee_id: {}", e)))?;
    let customer_id = CustomerId::new(row.get::<String, _>("customer_id"))
        .map_err(|e| DomainError::new(ErrorCode::InternalError, format!("Corrupt customer_id: {}", e)))?;

    Ok(PlanRow::reconstitute(
        PlanRowId::from_uuid(row.get("id")),
        year,
        company_type,
        assignee_id,
        customer_id,
        row.get("customer_name"),
        row.get("item_subcategory"),
        row.get("sales_mgmt_unit"),
        monthly_qty_from_db(qty)?,
        monthly_amount_from_db(amount)?,
        str_to_plan_type(row.get("plan_type"))?,
        str_to_stage(row.get("stage"))?,
        Timestamp::from_datetime(row.get("created_at")),
        Timestamp::from_datetime(row.get("updated_at")),
    ))
}

fn monthly_qty_from_db(values: Vec<f64>) -> Result<MonthlyQty, DomainError> {
    let array: [f64; 12] = values.try_into().map_err(|v: Vec<f64>| {
        DomainError::new(
            ErrorCode::InternalError,
            format!("Expected 12 monthly qty values, found {}", v.len()),
        )
    })?;
    Ok(MonthlyQty::from_values(array))
}

fn monthly_amount_from_db(values: Vec<i64>) -> Result<MonthlyAmount, DomainError> {
    let array: [i64; 12] = values.try_into().map_err(|v: Vec<i64>| {
        DomainError::new(
            ErrorCode::InternalError,
            format!("Expected 12 monthly amount values, found {}", v.len()),
        )
    })?;
    Ok(MonthlyAmount::from_values(array))
}

fn plan_type_to_str(plan_type: PlanType) -> &'static str {
    match plan_type {
        PlanType::Baseline => "baseline",
        PlanType::Planning => "planning",
    }
}

fn str_to_plan_type(s: &str) -> Result<PlanType, DomainError> {
    match s {
        "baseline" => Ok(PlanType::Baseline),
        "planning" => Ok(PlanType::Planning),
        _ => Err(DomainError::new(
            ErrorCode::InternalError,
            format!("Unknown plan type: {}", s),
        )),
    }
}

fn stage_to_str(stage: Stage) -> &'static str {
    match stage {
        Stage::Initial => "initial",
        Stage::Planning => "planning",
        Stage::Confirmed => "confirmed",
    }
}

fn str_to_stage(s: &str) -> Result<Stage, DomainError> {
    match s {
        "initial" => Ok(Stage::Initial),
        "planning" => Ok(Stage::Planning),
        "confirmed" => Ok(Stage::Confirmed),
        _ => Err(DomainError::new(
            ErrorCode::InternalError,
            format!("Unknown stage: {}", s),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_type_round_trips() {
        for plan_type in [PlanType::Baseline, PlanType::Planning] {
            let s = plan_type_to_str(plan_type);
            let back = str_to_plan_type(s).unwrap();
            assert_eq!(plan_type, back);
        }
    }

    #[test]
    fn stage_round_trips() {
        for stage in [Stage::Initial, Stage::Planning, Stage::Confirmed] {
            let s = stage_to_str(stage);
            let back = str_to_stage(s).unwrap();
            assert_eq!(stage, back);
        }
    }

    #[test]
    fn invalid_plan_type_returns_error() {
        assert!(str_to_plan_type("draft").is_err());
    }

    #[test]
    fn invalid_stage_returns_error() {
        assert!(str_to_stage("locked").is_err());
    }

    #[test]
    fn monthly_series_require_twelve_slots() {
        assert!(monthly_qty_from_db(vec![1.0; 12]).is_ok());
        assert!(monthly_qty_from_db(vec![1.0; 11]).is_err());
        assert!(monthly_amount_from_db(vec![1; 13]).is_err());
    }
}
