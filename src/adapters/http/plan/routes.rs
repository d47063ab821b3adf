//! Route configuration for plan endpoints.
//!
//! Configures Axum router with planning-related routes.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    add_plan_units, bulk_distribute, bulk_ratio, confirm_customer, get_remark, init_baseline,
    list_plan_rows, save_remark, status_counts, totals, totals_breakdown, totals_confirmed,
    upsert_plan_row, PlanAppState,
};

/// Creates the plan router with all endpoints.
///
/// Routes:
/// - `GET  /api/v1/plan/rows` - List plan rows for a customer or scope
/// - `POST /api/v1/plan/rows` - Upsert a single plan row
/// - `POST /api/v1/plan/init` - Seed baseline rows from prior-year actuals
/// - `POST /api/v1/plan/bulk-distribute` - Distribute yearly totals per row
/// - `POST /api/v1/plan/bulk-ratio` - Scale a customer's rows by a percentage
/// - `POST /api/v1/plan/add-units` - Add new plan units to a customer
/// - `POST /api/v1/plan/confirm-customer` - Confirm all rows of a customer
/// - `GET  /api/v1/plan/totals` - Per-company amount totals
/// - `GET  /api/v1/plan/totals-confirmed` - Totals over confirmed customers
/// - `GET  /api/v1/plan/totals-breakdown` - Grouped totals for one company
/// - `GET  /api/v1/plan/customer-status-counts` - Customer status tallies
/// - `GET  /api/v1/plan/remark` / `POST /api/v1/plan/remark` - Customer remark
pub fn plan_router() -> Router<PlanAppState> {
    Router::new()
        .route(
            "/api/v1/plan/rows",
            get(list_plan_rows).post(upsert_plan_row),
        )
        .route("/api/v1/plan/init", post(init_baseline))
        .route("/api/v1/plan/bulk-distribute", post(bulk_distribute))
        .route("/api/v1/plan/bulk-ratio", post(bulk_ratio))
        .route("/api/v1/plan/add-units", post(add_plan_units))
        .route("/api/v1/plan/confirm-customer", post(confirm_customer))
        .route("/api/v1/plan/totals", get(totals))
        .route("/api/v1/plan/totals-confirmed", get(totals_confirmed))
        .route("/api/v1/plan/totals-breakdown", get(totals_breakdown))
        .route(
            "/api/v1/plan/customer-status-counts",
            get(status_counts),
        )
        .route("/api/v1/plan/remark", get(get_remark).post(save_remark))
}
