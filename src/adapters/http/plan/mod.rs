//! HTTP adapter for the plan module.
//!
//! This module exposes plan operations via REST endpoints: row upserts,
//! baseline seeding, bulk distribution and scaling, unit additions,
//! confirmation, aggregate views, and customer remarks.

pub mod dto;
pub mod handlers;
pub mod routes;

// Re-export commonly used types
pub use handlers::PlanAppState;
pub use routes::plan_router;
