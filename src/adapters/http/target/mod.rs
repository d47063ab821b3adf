//! HTTP adapter for assigned targets.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::TargetAppState;
pub use routes::target_router;
