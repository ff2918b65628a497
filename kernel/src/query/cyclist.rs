use crate::entity::{Cyclist, CyclistId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait CyclistQuery: Sync + Send + 'static {
    async fn find_by_id(&self, id: &CyclistId)
        -> error_stack::Result<Option<Cyclist>, KernelError>;

    /// Email lookup is case-insensitive.
    async fn find_by_email(&self, email: &str)
        -> error_stack::Result<Option<Cyclist>, KernelError>;

    async fn find_all(&self) -> error_stack::Result<Vec<Cyclist>, KernelError>;
}

pub trait DependOnCyclistQuery: Sync + Send + 'static {
    type CyclistQuery: CyclistQuery;
    fn cyclist_query(&self) -> &Self::CyclistQuery;
}
