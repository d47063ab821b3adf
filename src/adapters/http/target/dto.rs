//! HTTP DTOs for assigned target endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::CompanyType;
use crate::domain::target::AssignedTarget;

/// Query for assigned targets.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedTargetQuery {
    pub year: i32,
    pub employee_name: String,
}

/// One assigned target line.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedTargetResponse {
    pub year: i32,
    pub company_type: CompanyType,
    pub employee_name: String,
    pub assigned_amount: f64,
    pub stage: Option<String>,
}

impl From<AssignedTarget> for AssignedTargetResponse {
    fn from(target: AssignedTarget) -> Self {
        Self {
            year: target.year,
            company_type: target.company_type,
            employee_name: target.employee_name,
            assigned_amount: target.assigned_amount,
            stage: target.stage,
        }
    }
}

/// Response for the assigned targets endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct AssignedTargetListResponse {
    pub targets: Vec<AssignedTargetResponse>,
}
