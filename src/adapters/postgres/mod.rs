//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresPlanRowRepository` - Plan rows with monthly series as arrays
//! - `PostgresAvgPriceSource` - Average prices aggregated from invoice lines
//! - `PostgresInvoiceHistoryReader` - Prior-year actuals folded per month
//! - `PostgresAssignedTargetReader` - Company-assigned yearly targets
//! - `PostgresPlanRemarkRepository` - Free-text remark per customer plan

mod assigned_target_reader;
mod avg_price_source;
mod invoice_history_reader;
mod plan_remark_repository;
mod plan_row_repository;

pub use assigned_target_reader::PostgresAssignedTargetReader;
pub use avg_price_source::PostgresAvgPriceSource;
pub use invoice_history_reader::PostgresInvoiceHistoryReader;
pub use plan_remark_repository::PostgresPlanRemarkRepository;
pub use plan_row_repository::PostgresPlanRowRepository;
