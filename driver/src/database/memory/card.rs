use std::collections::HashMap;

use tokio::sync::RwLock;

use kernel::interface::query::CardQuery;
use kernel::interface::update::CardModifier;
use kernel::prelude::entity::{CreditCard, CyclistId};
use kernel::KernelError;

#[derive(Debug, Default)]
pub struct InMemoryCardRepository {
    cards: RwLock<HashMap<CyclistId, CreditCard>>,
}

impl InMemoryCardRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl CardQuery for InMemoryCardRepository {
    async fn find_by_cyclist_id(
        &self,
        cyclist_id: &CyclistId,
    ) -> error_stack::Result<Option<CreditCard>, KernelError> {
        Ok(self.cards.read().await.get(cyclist_id).cloned())
    }
}

#[async_trait::async_trait]
impl CardModifier for InMemoryCardRepository {
    async fn upsert(&self, card: &CreditCard) -> error_stack::Result<(), KernelError> {
        self.cards
            .write()
            .await
            .insert(*card.cyclist_id(), card.clone());
        Ok(())
    }

    async fn delete_all(&self) -> error_stack::Result<(), KernelError> {
        self.cards.write().await.clear();
        Ok(())
    }
}
