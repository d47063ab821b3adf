//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `plan` - PlanRow aggregate, distribution/ratio calculators, status and summaries
//! - `pricing` - Unit price vocabulary and amount computation
//! - `target` - Assigned yearly targets (external read-only input)

pub mod foundation;
pub mod plan;
pub mod pricing;
pub mod target;
