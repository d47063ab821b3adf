//! HTTP adapter for the pricing module.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::PricingAppState;
pub use routes::pricing_router;
