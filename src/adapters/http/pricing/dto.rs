//! HTTP DTOs for pricing endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::CompanyType;
use crate::domain::pricing::UnitPrice;

/// Query for average unit prices.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvgUnitPriceQuery {
    pub company_type: CompanyType,
    pub year: i32,
    /// When present, prices are scoped to this assignee's own history.
    pub assignee_id: Option<String>,
}

/// One aggregated unit price line.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitPriceResponse {
    pub sales_mgmt_unit: String,
    pub avg_price: f64,
    pub total_amount: f64,
    pub total_qty: f64,
    pub item_unit: Option<String>,
    pub item_std_unit: Option<String>,
}

impl From<UnitPrice> for UnitPriceResponse {
    fn from(price: UnitPrice) -> Self {
        Self {
            sales_mgmt_unit: price.sales_mgmt_unit,
            avg_price: price.avg_price,
            total_amount: price.total_amount,
            total_qty: price.total_qty,
            item_unit: price.item_unit,
            item_std_unit: price.item_std_unit,
        }
    }
}

/// Response for the avg-unit-price endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct UnitPriceListResponse {
    pub prices: Vec<UnitPriceResponse>,
}
