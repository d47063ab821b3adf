//! Assigned target reader port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::target::AssignedTarget;

/// Read access to targets assigned upstream, keyed by employee name.
#[async_trait]
pub trait AssignedTargetReader: Send + Sync {
    /// Targets assigned to one employee for a year (one per company at
    /// most; empty when nothing was assigned).
    async fn find(&self, year: i32, employee_name: &str)
        -> Result<Vec<AssignedTarget>, DomainError>;
}
