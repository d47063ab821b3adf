//! Assigned yearly targets handed down by the upstream target process.

use serde::Serialize;

use crate::domain::foundation::CompanyType;

/// A yearly amount target assigned to one employee for one company.
///
/// Read-only input; this service never writes assigned targets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignedTarget {
    pub year: i32,
    pub company_type: CompanyType,
    pub employee_name: String,
    pub assigned_amount: f64,
    pub stage: Option<String>,
}
