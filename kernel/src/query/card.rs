use crate::entity::{CreditCard, CyclistId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait CardQuery: Sync + Send + 'static {
    async fn find_by_cyclist_id(
        &self,
        cyclist_id: &CyclistId,
    ) -> error_stack::Result<Option<CreditCard>, KernelError>;
}

pub trait DependOnCardQuery: Sync + Send + 'static {
    type CardQuery: CardQuery;
    fn card_query(&self) -> &Self::CardQuery;
}
