//! Plan module - the yearly sales plan and its calculators.

pub mod conflict;
pub mod distribution;
pub mod monthly;
pub mod row;
pub mod status;
pub mod summary;

pub use conflict::{find_conflicts, UnitPair};
pub use distribution::{apply_ratio, distribute, distribute_raw};
pub use monthly::{Month, MonthlyAmount, MonthlyQty};
pub use row::{PlanRow, PlanRowKey, PlanType, Stage};
pub use status::{customer_status, statuses_by_customer, CustomerPlanStatus, StatusCounts};
pub use summary::{
    breakdown, confirmed_totals_by_company, customer_status_counts, totals_by_company,
    BreakdownEntry, GroupBy,
};
