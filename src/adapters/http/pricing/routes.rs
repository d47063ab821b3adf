//! Route configuration for pricing endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{avg_unit_price, PricingAppState};

/// Creates the pricing router.
///
/// Routes:
/// - `GET /api/v1/pricing/avg-unit-price` - Aggregated prices per unit
pub fn pricing_router() -> Router<PricingAppState> {
    Router::new().route("/api/v1/pricing/avg-unit-price", get(avg_unit_price))
}
