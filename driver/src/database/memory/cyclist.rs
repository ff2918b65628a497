use std::collections::HashMap;

use error_stack::Report;
use tokio::sync::RwLock;

use kernel::interface::gateway::CyclistDirectory;
use kernel::interface::query::CyclistQuery;
use kernel::interface::update::CyclistModifier;
use kernel::prelude::entity::{Cyclist, CyclistId, Eligibility};
use kernel::KernelError;

/// Cyclists kept in process memory. Doubles as the rental engine's
/// eligibility directory.
#[derive(Debug, Default)]
pub struct InMemoryCyclistRepository {
    cyclists: RwLock<HashMap<CyclistId, Cyclist>>,
}

impl InMemoryCyclistRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_taken(cyclists: &HashMap<CyclistId, Cyclist>, cyclist: &Cyclist) -> bool {
    cyclists
        .values()
        .any(|other| other.id() != cyclist.id() && other.email().matches(cyclist.email().as_str()))
}

#[async_trait::async_trait]
impl CyclistQuery for InMemoryCyclistRepository {
    async fn find_by_id(&self, id: &CyclistId) -> error_stack::Result<Option<Cyclist>, KernelError> {
        Ok(self.cyclists.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> error_stack::Result<Option<Cyclist>, KernelError> {
        let cyclists = self.cyclists.read().await;
        Ok(cyclists
            .values()
            .find(|cyclist| cyclist.email().matches(email))
            .cloned())
    }

    async fn find_all(&self) -> error_stack::Result<Vec<Cyclist>, KernelError> {
        Ok(self.cyclists.read().await.values().cloned().collect())
    }
}

#[async_trait::async_trait]
impl CyclistModifier for InMemoryCyclistRepository {
    async fn create(&self, cyclist: &Cyclist) -> error_stack::Result<(), KernelError> {
        let mut cyclists = self.cyclists.write().await;
        if cyclists.contains_key(cyclist.id()) || email_taken(&cyclists, cyclist) {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable(format!("cyclist {} already exists", cyclist.id())));
        }
        cyclists.insert(*cyclist.id(), cyclist.clone());
        Ok(())
    }

    async fn update(&self, cyclist: &Cyclist) -> error_stack::Result<(), KernelError> {
        let mut cyclists = self.cyclists.write().await;
        if !cyclists.contains_key(cyclist.id()) {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("cyclist {} not found", cyclist.id())));
        }
        if email_taken(&cyclists, cyclist) {
            return Err(Report::new(KernelError::Conflict).attach_printable(format!(
                "email {} belongs to another cyclist",
                cyclist.email().as_str()
            )));
        }
        cyclists.insert(*cyclist.id(), cyclist.clone());
        Ok(())
    }

    async fn delete_all(&self) -> error_stack::Result<(), KernelError> {
        self.cyclists.write().await.clear();
        Ok(())
    }
}

#[async_trait::async_trait]
impl CyclistDirectory for InMemoryCyclistRepository {
    async fn eligibility(
        &self,
        cyclist_id: &CyclistId,
    ) -> error_stack::Result<Eligibility, KernelError> {
        let cyclists = self.cyclists.read().await;
        Ok(cyclists
            .get(cyclist_id)
            .map(Cyclist::eligibility)
            .unwrap_or_else(Eligibility::unknown))
    }
}
