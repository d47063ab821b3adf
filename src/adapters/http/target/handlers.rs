//! HTTP handlers for assigned target endpoints.

use std::sync::Arc;

use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::plan::dto::ErrorResponse;
use crate::ports::AssignedTargetReader;

use super::dto::{AssignedTargetListResponse, AssignedTargetQuery, AssignedTargetResponse};

/// Shared application state for target endpoints.
#[derive(Clone)]
pub struct TargetAppState {
    pub target_reader: Arc<dyn AssignedTargetReader>,
}

impl TargetAppState {
    pub fn new(target_reader: Arc<dyn AssignedTargetReader>) -> Self {
        Self { target_reader }
    }
}

/// GET /api/v1/targets/assigned - Company-assigned yearly targets
pub async fn assigned_targets(
    State(state): State<TargetAppState>,
    Query(query): Query<AssignedTargetQuery>,
) -> Result<impl IntoResponse, TargetApiError> {
    let targets = state
        .target_reader
        .find(query.year, &query.employee_name)
        .await
        .map_err(|e| TargetApiError::Internal(e.to_string()))?;

    Ok(Json(AssignedTargetListResponse {
        targets: targets
            .into_iter()
            .map(AssignedTargetResponse::from)
            .collect(),
    }))
}

/// API error type for target endpoints.
#[derive(Debug)]
pub enum TargetApiError {
    Internal(String),
}

impl IntoResponse for TargetApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            TargetApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal(msg))
            }
        };

        (status, Json(error)).into_response()
    }
}
