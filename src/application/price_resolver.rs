//! Unit price resolution with two-level fallback and per-scope caching.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::foundation::{AssigneeId, CompanyType, DomainError, PlanYear};
use crate::domain::pricing::{normalize_unit, PriceScope};
use crate::ports::AvgPriceSource;

/// Resolves the price for a sales management unit from invoice history.
///
/// Precedence: the assignee's own prior-year average, falling back to the
/// company-wide average, else no price. Each scope's price map is fetched
/// once and cached for the resolver's lifetime; seeding a whole book of
/// customers touches each scope exactly once.
pub struct UnitPriceResolver {
    source: Arc<dyn AvgPriceSource>,
    cache: RwLock<HashMap<PriceScope, HashMap<String, f64>>>,
}

impl UnitPriceResolver {
    pub fn new(source: Arc<dyn AvgPriceSource>) -> Self {
        Self {
            source,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Resolves the unit price for `plan_year` from the prior year's
    /// invoices, rounded to an integer. `None` when neither scope has a
    /// positive average; callers then store zero amounts.
    pub async fn resolve(
        &self,
        company_type: CompanyType,
        assignee_id: &AssigneeId,
        sales_mgmt_unit: &str,
        plan_year: PlanYear,
    ) -> Result<Option<i64>, DomainError> {
        let year = plan_year.prev();
        let unit_key = normalize_unit(sales_mgmt_unit);

        let assignee_scope = PriceScope {
            company_type,
            assignee: Some(assignee_id.clone()),
            year,
        };
        if let Some(price) = self.lookup(&assignee_scope, &unit_key).await? {
            if price > 0.0 {
                return Ok(Some(price.round() as i64));
            }
        }

        let company_scope = PriceScope {
            company_type,
            assignee: None,
            year,
        };
        if let Some(price) = self.lookup(&company_scope, &unit_key).await? {
            if price > 0.0 {
                return Ok(Some(price.round() as i64));
            }
        }

        Ok(None)
    }

    async fn lookup(&self, scope: &PriceScope, unit_key: &str) -> Result<Option<f64>, DomainError> {
        {
            let cache = self.cache.read().await;
            if let Some(map) = cache.get(scope) {
                return Ok(map.get(unit_key).copied());
            }
        }

        let prices = match &scope.assignee {
            Some(assignee) => {
                self.source
                    .assignee_prices(scope.company_type, assignee, scope.year)
                    .await?
            }
            None => self.source.company_prices(scope.company_type, scope.year).await?,
        };

        let map: HashMap<String, f64> = prices
            .into_iter()
            .map(|p| (normalize_unit(&p.sales_mgmt_unit), p.avg_price))
            .collect();

        let value = map.get(unit_key).copied();
        self.cache.write().await.insert(scope.clone(), map);
        Ok(value)
    }
}
