//! CompanyType enum for the two selling companies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// The selling company a plan row belongs to.
///
/// Every plan row, invoice actual, and assigned target is scoped to exactly
/// one of the two companies; totals are always reported per company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompanyType {
    CompanyA,
    CompanyB,
}

impl CompanyType {
    /// All company types, in reporting order.
    pub fn all() -> &'static [CompanyType] {
        &[CompanyType::CompanyA, CompanyType::CompanyB]
    }

    /// Short code used in persistence and query parameters.
    pub fn code(&self) -> &'static str {
        match self {
            CompanyType::CompanyA => "A",
            CompanyType::CompanyB => "B",
        }
    }

    /// Parses the short code form.
    pub fn from_code(s: &str) -> Result<Self, ValidationError> {
        match s.trim() {
            "A" => Ok(CompanyType::CompanyA),
            "B" => Ok(CompanyType::CompanyB),
            other => Err(ValidationError::invalid_format(
                "company_type",
                format!("expected A or B, got '{}'", other),
            )),
        }
    }
}

impl fmt::Display for CompanyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for CompanyType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}
