use crate::entity::CreditCard;
use crate::KernelError;

#[async_trait::async_trait]
pub trait CardModifier: 'static + Sync + Send {
    async fn upsert(&self, card: &CreditCard) -> error_stack::Result<(), KernelError>;
    async fn delete_all(&self) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnCardModifier: 'static + Sync + Send {
    type CardModifier: CardModifier;
    fn card_modifier(&self) -> &Self::CardModifier;
}
