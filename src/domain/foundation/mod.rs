//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the sales planning domain.

mod company;
mod errors;
mod ids;
mod percentage;
mod plan_year;
mod timestamp;

pub use company::CompanyType;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AssigneeId, CustomerId, PlanRowId};
pub use percentage::{RatioPercent, UpliftPercent};
pub use plan_year::PlanYear;
pub use timestamp::Timestamp;
