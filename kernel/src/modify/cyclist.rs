use crate::entity::Cyclist;
use crate::KernelError;

#[async_trait::async_trait]
pub trait CyclistModifier: 'static + Sync + Send {
    /// Fails with `Conflict` when the id or the email is already taken.
    async fn create(&self, cyclist: &Cyclist) -> error_stack::Result<(), KernelError>;
    /// Fails with `NotFound` for an unknown cyclist and `Conflict` when the new
    /// email belongs to someone else.
    async fn update(&self, cyclist: &Cyclist) -> error_stack::Result<(), KernelError>;
    async fn delete_all(&self) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnCyclistModifier: 'static + Sync + Send {
    type CyclistModifier: CyclistModifier;
    fn cyclist_modifier(&self) -> &Self::CyclistModifier;
}
