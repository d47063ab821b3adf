//! HTTP DTOs (Data Transfer Objects) for plan endpoints.
//!
//! These types define the JSON request/response structure for the planning
//! API. They serve as the boundary between HTTP and the application layer.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::CompanyType;
use crate::domain::plan::{BreakdownEntry, PlanRow, PlanType, Stage, StatusCounts};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Query for listing plan rows.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPlanRowsQuery {
    pub year: i32,
    pub company_type: CompanyType,
    pub assignee_id: String,
    /// When absent, the whole (year, company, assignee) scope is returned.
    pub customer_id: Option<String>,
}

/// Request to create or fully replace one plan row.
///
/// Either `qty` (twelve explicit values) or `startMonth` + `totalQty`
/// (even distribution) must be supplied.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertPlanRowRequest {
    pub year: i32,
    pub company_type: CompanyType,
    pub assignee_id: String,
    pub customer_id: String,
    pub customer_name: Option<String>,
    pub item_subcategory: String,
    pub sales_mgmt_unit: String,
    pub start_month: Option<u8>,
    pub total_qty: Option<f64>,
    pub qty: Option<[f64; 12]>,
    /// Explicit amounts; when absent, amounts are derived from unit prices.
    pub amount: Option<[i64; 12]>,
    /// Required to edit a confirmed row.
    #[serde(default)]
    pub reopen: bool,
}

/// Request to seed a scope from prior-year actuals.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitBaselineRequest {
    pub year: i32,
    pub company_type: CompanyType,
    pub assignee_id: String,
    #[serde(default)]
    pub uplift_percent: f64,
}

/// One row of a bulk distribution or add-units request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanUnitInput {
    pub item_subcategory: String,
    pub sales_mgmt_unit: String,
    pub start_month: u8,
    pub total_qty: f64,
}

/// Request to distribute yearly totals over several rows of one customer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDistributeRequest {
    pub year: i32,
    pub company_type: CompanyType,
    pub assignee_id: String,
    pub customer_id: String,
    pub customer_name: Option<String>,
    pub rows: Vec<PlanUnitInput>,
}

/// Request to scale all rows of one customer by a percentage.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkRatioRequest {
    pub year: i32,
    pub company_type: CompanyType,
    pub assignee_id: String,
    pub customer_id: String,
    pub percent: f64,
}

/// Request to add new plan units to a customer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPlanUnitsRequest {
    pub year: i32,
    pub company_type: CompanyType,
    pub assignee_id: String,
    pub customer_id: String,
    pub customer_name: Option<String>,
    pub items: Vec<PlanUnitInput>,
}

/// Request to confirm a customer's plan.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmCustomerRequest {
    pub year: i32,
    /// Absent means both companies.
    pub company_type: Option<CompanyType>,
    pub assignee_id: String,
    pub customer_id: String,
}

/// Query for aggregate endpoints scoped to one assignee.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssigneeScopeQuery {
    pub year: i32,
    pub assignee_id: String,
}

/// Query for the totals breakdown endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownQuery {
    pub year: i32,
    pub assignee_id: String,
    pub company_type: CompanyType,
    /// `customer` or `unit`.
    pub group_by: String,
}

/// Query for reading a remark.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemarkQuery {
    pub year: i32,
    pub assignee_id: String,
    pub customer_id: String,
}

/// Request to save a remark.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRemarkRequest {
    pub year: i32,
    pub assignee_id: String,
    pub customer_id: String,
    pub remark: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// One plan row in responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRowResponse {
    pub id: String,
    pub year: i32,
    pub company_type: CompanyType,
    pub assignee_id: String,
    pub customer_id: String,
    pub customer_name: Option<String>,
    pub item_subcategory: String,
    pub sales_mgmt_unit: String,
    pub qty: [f64; 12],
    pub amount: [i64; 12],
    pub plan_type: PlanType,
    pub stage: Stage,
    /// ISO 8601 timestamps.
    pub created_at: String,
    pub updated_at: String,
}

impl From<&PlanRow> for PlanRowResponse {
    fn from(row: &PlanRow) -> Self {
        Self {
            id: row.id().to_string(),
            year: row.year().value(),
            company_type: row.company_type(),
            assignee_id: row.assignee_id().to_string(),
            customer_id: row.customer_id().to_string(),
            customer_name: row.customer_name().map(str::to_string),
            item_subcategory: row.item_subcategory().to_string(),
            sales_mgmt_unit: row.sales_mgmt_unit().to_string(),
            qty: *row.qty().values(),
            amount: *row.amount().values(),
            plan_type: row.plan_type(),
            stage: row.stage(),
            created_at: row.created_at().as_datetime().to_rfc3339(),
            updated_at: row.updated_at().as_datetime().to_rfc3339(),
        }
    }
}

/// Response for list endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct PlanRowListResponse {
    pub rows: Vec<PlanRowResponse>,
}

/// Response for the single-row upsert.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertPlanRowResponse {
    pub row: PlanRowResponse,
    pub created: bool,
}

/// Response for baseline seeding.
#[derive(Debug, Clone, Serialize)]
pub struct InitBaselineResponse {
    pub seeded: u32,
}

/// Response for bulk operations.
#[derive(Debug, Clone, Serialize)]
pub struct BulkApplyResponse {
    pub applied: u32,
}

/// Response for add-units.
#[derive(Debug, Clone, Serialize)]
pub struct AddPlanUnitsResponse {
    pub added: u32,
}

/// Response for confirm-customer.
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmCustomerResponse {
    pub confirmed: u64,
}

/// Per-company amount totals, keyed by company code name.
#[derive(Debug, Clone, Serialize)]
pub struct TotalsResponse {
    pub totals: std::collections::BTreeMap<CompanyType, i64>,
}

/// Breakdown entries for one company scope.
#[derive(Debug, Clone, Serialize)]
pub struct BreakdownResponse {
    pub entries: Vec<BreakdownEntry>,
}

/// Customer status tallies.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCountsResponse {
    pub total: u32,
    pub confirmed: u32,
    pub in_progress: u32,
}

impl From<StatusCounts> for StatusCountsResponse {
    fn from(counts: StatusCounts) -> Self {
        Self {
            total: counts.total,
            confirmed: counts.confirmed,
            in_progress: counts.in_progress,
        }
    }
}

/// Remark payload.
#[derive(Debug, Clone, Serialize)]
pub struct RemarkResponse {
    pub remark: Option<String>,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional error details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            code: "CONFLICT".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }
}
