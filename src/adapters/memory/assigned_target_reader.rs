//! In-memory assigned target reader.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::domain::target::AssignedTarget;
use crate::ports::AssignedTargetReader;

#[derive(Default)]
pub struct InMemoryAssignedTargetReader {
    targets: RwLock<Vec<AssignedTarget>>,
}

impl InMemoryAssignedTargetReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_target(&self, target: AssignedTarget) {
        self.targets.write().await.push(target);
    }
}

#[async_trait]
impl AssignedTargetReader for InMemoryAssignedTargetReader {
    async fn find(
        &self,
        year: i32,
        employee_name: &str,
    ) -> Result<Vec<AssignedTarget>, DomainError> {
        Ok(self
            .targets
            .read()
            .await
            .iter()
            .filter(|t| t.year == year && t.employee_name == employee_name)
            .cloned()
            .collect())
    }
}
