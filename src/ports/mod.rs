//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.

mod assigned_target_reader;
mod avg_price_source;
mod invoice_history_reader;
mod plan_remark_repository;
mod plan_row_repository;

pub use assigned_target_reader::AssignedTargetReader;
pub use avg_price_source::AvgPriceSource;
pub use invoice_history_reader::{CustomerUnitActuals, InvoiceHistoryReader};
pub use plan_remark_repository::PlanRemarkRepository;
pub use plan_row_repository::PlanRowRepository;
