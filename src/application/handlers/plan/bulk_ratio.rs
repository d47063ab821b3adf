//! BulkRatioHandler - scale every plan row of a customer by a percentage.

use std::sync::Arc;

use crate::application::price_resolver::UnitPriceResolver;
use crate::domain::foundation::{
    AssigneeId, CompanyType, CustomerId, DomainError, PlanYear, RatioPercent,
};
use crate::domain::plan::{apply_ratio, Stage};
use crate::domain::pricing::amounts_for;
use crate::ports::PlanRowRepository;

/// Command to scale all of a customer's rows by `percent`.
///
/// The ratio always applies to the currently persisted curve, so repeated
/// +10% calls compound rather than stacking on some original value.
#[derive(Debug, Clone)]
pub struct BulkRatioCommand {
    pub year: PlanYear,
    pub company_type: CompanyType,
    pub assignee_id: AssigneeId,
    pub customer_id: CustomerId,
    pub percent: RatioPercent,
}

#[derive(Debug, Clone)]
pub struct BulkRatioResult {
    pub applied: u32,
}

#[derive(Debug, Clone)]
pub enum BulkRatioError {
    /// A Confirmed row was encountered; rows scaled before it stay scaled.
    ConfirmedRow {
        applied: u32,
        sales_mgmt_unit: String,
    },
    Domain(DomainError),
}

impl std::fmt::Display for BulkRatioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BulkRatioError::ConfirmedRow {
                applied,
                sales_mgmt_unit,
            } => write!(
                f,
                "Row for unit '{}' is confirmed; {} row(s) were scaled before stopping",
                sales_mgmt_unit, applied
            ),
            BulkRatioError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for BulkRatioError {}

impl From<DomainError> for BulkRatioError {
    fn from(err: DomainError) -> Self {
        BulkRatioError::Domain(err)
    }
}

pub struct BulkRatioHandler {
    plan_repository: Arc<dyn PlanRowRepository>,
    price_resolver: Arc<UnitPriceResolver>,
}

impl BulkRatioHandler {
    pub fn new(
        plan_repository: Arc<dyn PlanRowRepository>,
        price_resolver: Arc<UnitPriceResolver>,
    ) -> Self {
        Self {
            plan_repository,
            price_resolver,
        }
    }

    pub async fn handle(&self, cmd: BulkRatioCommand) -> Result<BulkRatioResult, BulkRatioError> {
        let rows = self
            .plan_repository
            .find_by_customer(cmd.year, cmd.company_type, &cmd.assignee_id, &cmd.customer_id)
            .await?;

        let mut applied = 0u32;

        for mut row in rows {
            if row.stage() == Stage::Confirmed {
                return Err(BulkRatioError::ConfirmedRow {
                    applied,
                    sales_mgmt_unit: row.sales_mgmt_unit().to_string(),
                });
            }

            let qty = apply_ratio(row.qty(), cmd.percent).rounded();
            let price = self
                .price_resolver
                .resolve(cmd.company_type, &cmd.assignee_id, row.sales_mgmt_unit(), cmd.year)
                .await?;
            let amount = amounts_for(&qty, price);

            row.replace_values(qty, amount)?;
            self.plan_repository.upsert(&row).await?;
            applied += 1;
        }

        Ok(BulkRatioResult { applied })
    }
}
