//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod plan;

pub use plan::{
    // Baseline seeding
    InitBaselineCommand, InitBaselineError, InitBaselineHandler, InitBaselineResult,
    // Single-row upsert
    QtyInput, UpsertPlanRowCommand, UpsertPlanRowError, UpsertPlanRowHandler, UpsertPlanRowResult,
    // Bulk operations
    BulkDistributeCommand, BulkDistributeError, BulkDistributeHandler, BulkDistributeResult,
    BulkDistributeRow,
    BulkRatioCommand, BulkRatioError, BulkRatioHandler, BulkRatioResult,
    // Unit additions
    AddPlanUnitsCommand, AddPlanUnitsError, AddPlanUnitsHandler, AddPlanUnitsResult, NewUnitItem,
    // Confirmation
    ConfirmCustomerCommand, ConfirmCustomerError, ConfirmCustomerHandler, ConfirmCustomerResult,
    // Remarks
    GetPlanRemarkHandler, GetPlanRemarkQuery, GetPlanRemarkResult, SavePlanRemarkCommand,
    SavePlanRemarkError, SavePlanRemarkHandler,
};
