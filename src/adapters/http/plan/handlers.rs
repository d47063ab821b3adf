//! HTTP handlers for plan endpoints.
//!
//! These handlers connect Axum routes to application layer command/query
//! handlers and map application errors onto HTTP statuses.

use std::sync::Arc;

use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::plan::{
    AddPlanUnitsCommand, AddPlanUnitsError, AddPlanUnitsHandler, BulkDistributeCommand,
    BulkDistributeError, BulkDistributeHandler, BulkRatioCommand, BulkRatioError, BulkRatioHandler,
    ConfirmCustomerCommand, ConfirmCustomerError, ConfirmCustomerHandler, GetPlanRemarkHandler,
    GetPlanRemarkQuery, InitBaselineCommand, InitBaselineError, InitBaselineHandler, NewUnitItem,
    QtyInput, SavePlanRemarkCommand, SavePlanRemarkError, SavePlanRemarkHandler,
    UpsertPlanRowCommand, UpsertPlanRowError, UpsertPlanRowHandler,
};
use crate::application::price_resolver::UnitPriceResolver;
use crate::domain::foundation::{
    AssigneeId, CustomerId, DomainError, ErrorCode, PlanYear, RatioPercent, UpliftPercent,
};
use crate::domain::plan::{
    breakdown, confirmed_totals_by_company, customer_status_counts, totals_by_company, GroupBy,
};
use crate::ports::{InvoiceHistoryReader, PlanRemarkRepository, PlanRowRepository};

use super::dto::{
    AddPlanUnitsRequest, AddPlanUnitsResponse, AssigneeScopeQuery, BreakdownQuery,
    BreakdownResponse, BulkApplyResponse, BulkDistributeRequest, BulkRatioRequest,
    ConfirmCustomerRequest, ConfirmCustomerResponse, ErrorResponse, InitBaselineRequest,
    InitBaselineResponse, ListPlanRowsQuery, PlanRowListResponse, PlanRowResponse, RemarkQuery,
    RemarkResponse, SaveRemarkRequest, StatusCountsResponse, TotalsResponse,
    UpsertPlanRowRequest, UpsertPlanRowResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all plan dependencies.
#[derive(Clone)]
pub struct PlanAppState {
    pub plan_repository: Arc<dyn PlanRowRepository>,
    pub invoice_history: Arc<dyn InvoiceHistoryReader>,
    pub remark_repository: Arc<dyn PlanRemarkRepository>,
    pub price_resolver: Arc<UnitPriceResolver>,
}

impl PlanAppState {
    pub fn new(
        plan_repository: Arc<dyn PlanRowRepository>,
        invoice_history: Arc<dyn InvoiceHistoryReader>,
        remark_repository: Arc<dyn PlanRemarkRepository>,
        price_resolver: Arc<UnitPriceResolver>,
    ) -> Self {
        Self {
            plan_repository,
            invoice_history,
            remark_repository,
            price_resolver,
        }
    }

    pub fn upsert_handler(&self) -> UpsertPlanRowHandler {
        UpsertPlanRowHandler::new(self.plan_repository.clone(), self.price_resolver.clone())
    }

    pub fn init_baseline_handler(&self) -> InitBaselineHandler {
        InitBaselineHandler::new(
            self.plan_repository.clone(),
            self.invoice_history.clone(),
            self.price_resolver.clone(),
        )
    }

    pub fn bulk_distribute_handler(&self) -> BulkDistributeHandler {
        BulkDistributeHandler::new(self.plan_repository.clone(), self.price_resolver.clone())
    }

    pub fn bulk_ratio_handler(&self) -> BulkRatioHandler {
        BulkRatioHandler::new(self.plan_repository.clone(), self.price_resolver.clone())
    }

    pub fn add_units_handler(&self) -> AddPlanUnitsHandler {
        AddPlanUnitsHandler::new(self.plan_repository.clone(), self.price_resolver.clone())
    }

    pub fn confirm_handler(&self) -> ConfirmCustomerHandler {
        ConfirmCustomerHandler::new(self.plan_repository.clone())
    }

    pub fn get_remark_handler(&self) -> GetPlanRemarkHandler {
        GetPlanRemarkHandler::new(self.remark_repository.clone())
    }

    pub fn save_remark_handler(&self) -> SavePlanRemarkHandler {
        SavePlanRemarkHandler::new(self.remark_repository.clone(), self.plan_repository.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Request parsing helpers
// ════════════════════════════════════════════════════════════════════════════════

fn parse_year(year: i32) -> Result<PlanYear, PlanApiError> {
    PlanYear::try_new(year).map_err(|e| PlanApiError::BadRequest(e.to_string()))
}

fn parse_assignee(id: &str) -> Result<AssigneeId, PlanApiError> {
    AssigneeId::new(id).map_err(|e| PlanApiError::BadRequest(e.to_string()))
}

fn parse_customer(id: &str) -> Result<CustomerId, PlanApiError> {
    CustomerId::new(id).map_err(|e| PlanApiError::BadRequest(e.to_string()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/v1/plan/rows - Upsert a single plan row
pub async fn upsert_plan_row(
    State(state): State<PlanAppState>,
    Json(request): Json<UpsertPlanRowRequest>,
) -> Result<impl IntoResponse, PlanApiError> {
    let input = match request.qty {
        Some(qty) => QtyInput::Explicit { qty },
        None => QtyInput::Distribute {
            start_month: request.start_month.unwrap_or(0),
            total_qty: request.total_qty.unwrap_or(0.0),
        },
    };

    let cmd = UpsertPlanRowCommand {
        year: parse_year(request.year)?,
        company_type: request.company_type,
        assignee_id: parse_assignee(&request.assignee_id)?,
        customer_id: parse_customer(&request.customer_id)?,
        customer_name: request.customer_name,
        item_subcategory: request.item_subcategory,
        sales_mgmt_unit: request.sales_mgmt_unit,
        input,
        explicit_amount: request.amount,
        reopen: request.reopen,
    };

    let result = state.upsert_handler().handle(cmd).await?;

    let status = if result.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    let response = UpsertPlanRowResponse {
        row: PlanRowResponse::from(&result.row),
        created: result.created,
    };
    Ok((status, Json(response)))
}

/// POST /api/v1/plan/init - Seed baseline rows from prior-year actuals
pub async fn init_baseline(
    State(state): State<PlanAppState>,
    Json(request): Json<InitBaselineRequest>,
) -> Result<impl IntoResponse, PlanApiError> {
    let uplift_percent = UpliftPercent::try_new(request.uplift_percent)
        .map_err(|e| PlanApiError::BadRequest(e.to_string()))?;

    let cmd = InitBaselineCommand {
        year: parse_year(request.year)?,
        company_type: request.company_type,
        assignee_id: parse_assignee(&request.assignee_id)?,
        uplift_percent,
    };

    let result = state.init_baseline_handler().handle(cmd).await?;

    Ok((
        StatusCode::CREATED,
        Json(InitBaselineResponse {
            seeded: result.seeded,
        }),
    ))
}

/// POST /api/v1/plan/bulk-distribute - Distribute yearly totals per row
pub async fn bulk_distribute(
    State(state): State<PlanAppState>,
    Json(request): Json<BulkDistributeRequest>,
) -> Result<impl IntoResponse, PlanApiError> {
    let cmd = BulkDistributeCommand {
        year: parse_year(request.year)?,
        company_type: request.company_type,
        assignee_id: parse_assignee(&request.assignee_id)?,
        customer_id: parse_customer(&request.customer_id)?,
        customer_name: request.customer_name,
        rows: request
            .rows
            .into_iter()
            .map(|r| crate::application::handlers::plan::BulkDistributeRow {
                item_subcategory: r.item_subcategory,
                sales_mgmt_unit: r.sales_mgmt_unit,
                start_month: r.start_month,
                total_qty: r.total_qty,
            })
            .collect(),
    };

    let result = state.bulk_distribute_handler().handle(cmd).await?;

    Ok(Json(BulkApplyResponse {
        applied: result.applied,
    }))
}

/// POST /api/v1/plan/bulk-ratio - Scale a customer's rows by a percentage
pub async fn bulk_ratio(
    State(state): State<PlanAppState>,
    Json(request): Json<BulkRatioRequest>,
) -> Result<impl IntoResponse, PlanApiError> {
    let percent = RatioPercent::try_new(request.percent)
        .map_err(|e| PlanApiError::BadRequest(e.to_string()))?;

    let cmd = BulkRatioCommand {
        year: parse_year(request.year)?,
        company_type: request.company_type,
        assignee_id: parse_assignee(&request.assignee_id)?,
        customer_id: parse_customer(&request.customer_id)?,
        percent,
    };

    let result = state.bulk_ratio_handler().handle(cmd).await?;

    Ok(Json(BulkApplyResponse {
        applied: result.applied,
    }))
}

/// POST /api/v1/plan/add-units - Add new plan units to a customer
pub async fn add_plan_units(
    State(state): State<PlanAppState>,
    Json(request): Json<AddPlanUnitsRequest>,
) -> Result<impl IntoResponse, PlanApiError> {
    let cmd = AddPlanUnitsCommand {
        year: parse_year(request.year)?,
        company_type: request.company_type,
        assignee_id: parse_assignee(&request.assignee_id)?,
        customer_id: parse_customer(&request.customer_id)?,
        customer_name: request.customer_name,
        items: request
            .items
            .into_iter()
            .map(|i| NewUnitItem {
                item_subcategory: i.item_subcategory,
                sales_mgmt_unit: i.sales_mgmt_unit,
                start_month: i.start_month,
                total_qty: i.total_qty,
            })
            .collect(),
    };

    let result = state.add_units_handler().handle(cmd).await?;

    Ok((
        StatusCode::CREATED,
        Json(AddPlanUnitsResponse {
            added: result.added,
        }),
    ))
}

/// POST /api/v1/plan/confirm-customer - Confirm all rows of a customer
pub async fn confirm_customer(
    State(state): State<PlanAppState>,
    Json(request): Json<ConfirmCustomerRequest>,
) -> Result<impl IntoResponse, PlanApiError> {
    let cmd = ConfirmCustomerCommand {
        year: parse_year(request.year)?,
        company_type: request.company_type,
        assignee_id: parse_assignee(&request.assignee_id)?,
        customer_id: parse_customer(&request.customer_id)?,
    };

    let result = state.confirm_handler().handle(cmd).await?;

    Ok(Json(ConfirmCustomerResponse {
        confirmed: result.confirmed,
    }))
}

/// POST /api/v1/plan/remark - Save the customer remark
pub async fn save_remark(
    State(state): State<PlanAppState>,
    Json(request): Json<SaveRemarkRequest>,
) -> Result<impl IntoResponse, PlanApiError> {
    let cmd = SavePlanRemarkCommand {
        year: parse_year(request.year)?,
        assignee_id: parse_assignee(&request.assignee_id)?,
        customer_id: parse_customer(&request.customer_id)?,
        remark: request.remark,
    };

    state.save_remark_handler().handle(cmd).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/v1/plan/rows - List plan rows for a customer or scope
pub async fn list_plan_rows(
    State(state): State<PlanAppState>,
    Query(query): Query<ListPlanRowsQuery>,
) -> Result<impl IntoResponse, PlanApiError> {
    let year = parse_year(query.year)?;
    let assignee_id = parse_assignee(&query.assignee_id)?;

    let rows = match &query.customer_id {
        Some(customer_id) => {
            let customer_id = parse_customer(customer_id)?;
            state
                .plan_repository
                .find_by_customer(year, query.company_type, &assignee_id, &customer_id)
                .await?
        }
        None => {
            state
                .plan_repository
                .find_by_scope(year, query.company_type, &assignee_id)
                .await?
        }
    };

    Ok(Json(PlanRowListResponse {
        rows: rows.iter().map(PlanRowResponse::from).collect(),
    }))
}

/// GET /api/v1/plan/totals - Per-company amount totals
pub async fn totals(
    State(state): State<PlanAppState>,
    Query(query): Query<AssigneeScopeQuery>,
) -> Result<impl IntoResponse, PlanApiError> {
    let year = parse_year(query.year)?;
    let assignee_id = parse_assignee(&query.assignee_id)?;

    let rows = state.plan_repository.find_by_assignee(year, &assignee_id).await?;

    Ok(Json(TotalsResponse {
        totals: totals_by_company(&rows),
    }))
}

/// GET /api/v1/plan/totals-confirmed - Totals over confirmed customers only
pub async fn totals_confirmed(
    State(state): State<PlanAppState>,
    Query(query): Query<AssigneeScopeQuery>,
) -> Result<impl IntoResponse, PlanApiError> {
    let year = parse_year(query.year)?;
    let assignee_id = parse_assignee(&query.assignee_id)?;

    let rows = state.plan_repository.find_by_assignee(year, &assignee_id).await?;

    Ok(Json(TotalsResponse {
        totals: confirmed_totals_by_company(&rows),
    }))
}

/// GET /api/v1/plan/totals-breakdown - Grouped totals for one company
pub async fn totals_breakdown(
    State(state): State<PlanAppState>,
    Query(query): Query<BreakdownQuery>,
) -> Result<impl IntoResponse, PlanApiError> {
    let year = parse_year(query.year)?;
    let assignee_id = parse_assignee(&query.assignee_id)?;
    let group_by = match query.group_by.as_str() {
        "customer" => GroupBy::Customer,
        "unit" => GroupBy::Unit,
        other => {
            return Err(PlanApiError::BadRequest(format!(
                "Unknown groupBy value: {}",
                other
            )))
        }
    };

    let rows = state
        .plan_repository
        .find_by_scope(year, query.company_type, &assignee_id)
        .await?;

    Ok(Json(BreakdownResponse {
        entries: breakdown(&rows, group_by),
    }))
}

/// GET /api/v1/plan/customer-status-counts - Customer status tallies
pub async fn status_counts(
    State(state): State<PlanAppState>,
    Query(query): Query<AssigneeScopeQuery>,
) -> Result<impl IntoResponse, PlanApiError> {
    let year = parse_year(query.year)?;
    let assignee_id = parse_assignee(&query.assignee_id)?;

    let rows = state.plan_repository.find_by_assignee(year, &assignee_id).await?;

    Ok(Json(StatusCountsResponse::from(customer_status_counts(
        &rows,
    ))))
}

/// GET /api/v1/plan/remark - Read the customer remark
pub async fn get_remark(
    State(state): State<PlanAppState>,
    Query(query): Query<RemarkQuery>,
) -> Result<impl IntoResponse, PlanApiError> {
    let result = state
        .get_remark_handler()
        .handle(GetPlanRemarkQuery {
            year: parse_year(query.year)?,
            assignee_id: parse_assignee(&query.assignee_id)?,
            customer_id: parse_customer(&query.customer_id)?,
        })
        .await?;

    Ok(Json(RemarkResponse {
        remark: result.remark,
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts application errors to HTTP responses.
#[derive(Debug)]
pub enum PlanApiError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl From<DomainError> for PlanApiError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => PlanApiError::BadRequest(err.to_string()),
            ErrorCode::PlanRowNotFound
            | ErrorCode::CustomerPlanNotFound
            | ErrorCode::RemarkNotFound
            | ErrorCode::NothingToConfirm => PlanApiError::NotFound(err.to_string()),
            ErrorCode::DuplicateUnit | ErrorCode::StageRefusal | ErrorCode::BaselineRefused => {
                PlanApiError::Conflict(err.to_string())
            }
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                PlanApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<UpsertPlanRowError> for PlanApiError {
    fn from(err: UpsertPlanRowError) -> Self {
        match err {
            UpsertPlanRowError::Validation(e) => PlanApiError::BadRequest(e.to_string()),
            UpsertPlanRowError::ConfirmedRow { .. } => PlanApiError::Conflict(err.to_string()),
            UpsertPlanRowError::Domain(e) => e.into(),
        }
    }
}

impl From<InitBaselineError> for PlanApiError {
    fn from(err: InitBaselineError) -> Self {
        match err {
            InitBaselineError::BaselineRefused => PlanApiError::Conflict(err.to_string()),
            InitBaselineError::Validation(e) => PlanApiError::BadRequest(e.to_string()),
            InitBaselineError::Domain(e) => e.into(),
        }
    }
}

impl From<BulkDistributeError> for PlanApiError {
    fn from(err: BulkDistributeError) -> Self {
        match &err {
            BulkDistributeError::RowFailed { source, .. } => match source {
                UpsertPlanRowError::Validation(_) => PlanApiError::BadRequest(err.to_string()),
                UpsertPlanRowError::ConfirmedRow { .. } => PlanApiError::Conflict(err.to_string()),
                UpsertPlanRowError::Domain(_) => PlanApiError::Internal(err.to_string()),
            },
        }
    }
}

impl From<BulkRatioError> for PlanApiError {
    fn from(err: BulkRatioError) -> Self {
        match err {
            BulkRatioError::ConfirmedRow { .. } => PlanApiError::Conflict(err.to_string()),
            BulkRatioError::Domain(e) => e.into(),
        }
    }
}

impl From<AddPlanUnitsError> for PlanApiError {
    fn from(err: AddPlanUnitsError) -> Self {
        match err {
            AddPlanUnitsError::DuplicateUnits(_) => PlanApiError::Conflict(err.to_string()),
            AddPlanUnitsError::Validation(e) => PlanApiError::BadRequest(e.to_string()),
            AddPlanUnitsError::Domain(e) => e.into(),
        }
    }
}

impl From<ConfirmCustomerError> for PlanApiError {
    fn from(err: ConfirmCustomerError) -> Self {
        match err {
            ConfirmCustomerError::NothingToConfirm => PlanApiError::NotFound(err.to_string()),
            ConfirmCustomerError::Domain(e) => e.into(),
        }
    }
}

impl From<SavePlanRemarkError> for PlanApiError {
    fn from(err: SavePlanRemarkError) -> Self {
        match err {
            SavePlanRemarkError::CustomerPlanNotFound => PlanApiError::NotFound(err.to_string()),
            SavePlanRemarkError::Validation(e) => PlanApiError::BadRequest(e.to_string()),
            SavePlanRemarkError::Domain(e) => e.into(),
        }
    }
}

impl IntoResponse for PlanApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            PlanApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            PlanApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::not_found(msg)),
            PlanApiError::Conflict(msg) => (StatusCode::CONFLICT, ErrorResponse::conflict(msg)),
            PlanApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal(msg))
            }
        };

        (status, Json(error)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_units_map_to_conflict() {
        let err = AddPlanUnitsError::DuplicateUnits(vec!["CASE".to_string()]);
        let api: PlanApiError = err.into();
        assert!(matches!(api, PlanApiError::Conflict(msg) if msg.contains("CASE")));
    }

    #[test]
    fn nothing_to_confirm_maps_to_not_found() {
        let api: PlanApiError = ConfirmCustomerError::NothingToConfirm.into();
        assert!(matches!(api, PlanApiError::NotFound(_)));
    }

    #[test]
    fn database_errors_map_to_internal() {
        let err = DomainError::new(ErrorCode::DatabaseError, "boom");
        let api: PlanApiError = err.into();
        assert!(matches!(api, PlanApiError::Internal(_)));
    }

    #[test]
    fn confirmed_row_refusal_maps_to_conflict() {
        let err = UpsertPlanRowError::ConfirmedRow {
            sales_mgmt_unit: "CASE".to_string(),
        };
        let api: PlanApiError = err.into();
        assert!(matches!(api, PlanApiError::Conflict(_)));
    }
}
