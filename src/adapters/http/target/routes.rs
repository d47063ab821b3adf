//! Route configuration for assigned target endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{assigned_targets, TargetAppState};

/// Creates the target router.
///
/// Routes:
/// - `GET /api/v1/targets/assigned` - Company-assigned yearly targets
pub fn target_router() -> Router<TargetAppState> {
    Router::new().route("/api/v1/targets/assigned", get(assigned_targets))
}
