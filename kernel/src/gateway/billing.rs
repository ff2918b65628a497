use crate::entity::{CyclistId, Money};
use crate::KernelError;

/// Charges cyclists. `Ok(false)` means the charge was declined.
#[async_trait::async_trait]
pub trait BillingGateway: 'static + Sync + Send {
    async fn charge_fixed(
        &self,
        cyclist_id: &CyclistId,
        amount: &Money,
    ) -> error_stack::Result<bool, KernelError>;

    async fn charge_extra(
        &self,
        cyclist_id: &CyclistId,
        amount: &Money,
    ) -> error_stack::Result<bool, KernelError>;
}

pub trait DependOnBillingGateway: 'static + Sync + Send {
    type BillingGateway: BillingGateway;
    fn billing_gateway(&self) -> &Self::BillingGateway;
}
