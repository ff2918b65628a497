use crate::entity::{CyclistId, Eligibility};
use crate::KernelError;

/// Answers whether a cyclist may rent. Unknown cyclists are reported through
/// [`Eligibility::exists`], not as an error.
#[async_trait::async_trait]
pub trait CyclistDirectory: 'static + Sync + Send {
    async fn eligibility(
        &self,
        cyclist_id: &CyclistId,
    ) -> error_stack::Result<Eligibility, KernelError>;
}

pub trait DependOnCyclistDirectory: 'static + Sync + Send {
    type CyclistDirectory: CyclistDirectory;
    fn cyclist_directory(&self) -> &Self::CyclistDirectory;
}
