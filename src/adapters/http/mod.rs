//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure.

pub mod plan;
pub mod pricing;
pub mod target;

// Re-export key types for convenience
pub use plan::plan_router;
pub use plan::PlanAppState;
pub use pricing::pricing_router;
pub use pricing::PricingAppState;
pub use target::target_router;
pub use target::TargetAppState;
