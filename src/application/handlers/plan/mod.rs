//! Plan command handlers.

pub mod add_units;
pub mod bulk_distribute;
pub mod bulk_ratio;
pub mod confirm_customer;
pub mod init_baseline;
pub mod remark;
pub mod upsert_row;

pub use add_units::{
    AddPlanUnitsCommand, AddPlanUnitsError, AddPlanUnitsHandler, AddPlanUnitsResult, NewUnitItem,
};
pub use bulk_distribute::{
    BulkDistributeCommand, BulkDistributeError, BulkDistributeHandler, BulkDistributeResult,
    BulkDistributeRow,
};
pub use bulk_ratio::{BulkRatioCommand, BulkRatioError, BulkRatioHandler, BulkRatioResult};
pub use confirm_customer::{
    ConfirmCustomerCommand, ConfirmCustomerError, ConfirmCustomerHandler, ConfirmCustomerResult,
};
pub use init_baseline::{
    InitBaselineCommand, InitBaselineError, InitBaselineHandler, InitBaselineResult,
};
pub use remark::{
    GetPlanRemarkHandler, GetPlanRemarkQuery, GetPlanRemarkResult, SavePlanRemarkCommand,
    SavePlanRemarkError, SavePlanRemarkHandler,
};
pub use upsert_row::{
    QtyInput, UpsertPlanRowCommand, UpsertPlanRowError, UpsertPlanRowHandler, UpsertPlanRowResult,
};
