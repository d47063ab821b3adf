//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - REST API routers and handlers
//! - `memory` - In-memory port implementations for tests and demo mode
//! - `postgres` - PostgreSQL-backed persistence

pub mod http;
pub mod memory;
pub mod postgres;
