//! In-memory adapters for tests and local development.

mod assigned_target_reader;
mod avg_price_source;
mod invoice_history_reader;
mod plan_remark_repository;
mod plan_row_repository;

pub use assigned_target_reader::InMemoryAssignedTargetReader;
pub use avg_price_source::InMemoryAvgPriceSource;
pub use invoice_history_reader::InMemoryInvoiceHistoryReader;
pub use plan_remark_repository::InMemoryPlanRemarkRepository;
pub use plan_row_repository::InMemoryPlanRowRepository;
