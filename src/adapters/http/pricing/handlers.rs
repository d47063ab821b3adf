//! HTTP handlers for pricing endpoints.

use std::sync::Arc;

use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::plan::dto::ErrorResponse;
use crate::domain::foundation::AssigneeId;
use crate::ports::AvgPriceSource;

use super::dto::{AvgUnitPriceQuery, UnitPriceListResponse, UnitPriceResponse};

/// Shared application state for pricing endpoints.
#[derive(Clone)]
pub struct PricingAppState {
    pub price_source: Arc<dyn AvgPriceSource>,
}

impl PricingAppState {
    pub fn new(price_source: Arc<dyn AvgPriceSource>) -> Self {
        Self { price_source }
    }
}

/// GET /api/v1/pricing/avg-unit-price - Aggregated prices per unit
///
/// With `assigneeId` the assignee's own history is used; without it the
/// company-wide aggregation is returned.
pub async fn avg_unit_price(
    State(state): State<PricingAppState>,
    Query(query): Query<AvgUnitPriceQuery>,
) -> Result<impl IntoResponse, PricingApiError> {
    let prices = match &query.assignee_id {
        Some(assignee_id) => {
            let assignee_id = AssigneeId::new(assignee_id)
                .map_err(|e| PricingApiError::BadRequest(e.to_string()))?;
            state
                .price_source
                .assignee_prices(query.company_type, &assignee_id, query.year)
                .await
                .map_err(|e| PricingApiError::Internal(e.to_string()))?
        }
        None => state
            .price_source
            .company_prices(query.company_type, query.year)
            .await
            .map_err(|e| PricingApiError::Internal(e.to_string()))?,
    };

    Ok(Json(UnitPriceListResponse {
        prices: prices.into_iter().map(UnitPriceResponse::from).collect(),
    }))
}

/// API error type for pricing endpoints.
#[derive(Debug)]
pub enum PricingApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for PricingApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            PricingApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            PricingApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal(msg))
            }
        };

        (status, Json(error)).into_response()
    }
}
