use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;

use kernel::interface::gateway::BillingGateway;
use kernel::prelude::entity::{CyclistId, Money};
use kernel::KernelError;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ChargeKind {
    Fixed,
    Extra,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Charge {
    pub cyclist_id: CyclistId,
    pub amount: Money,
    pub kind: ChargeKind,
}

/// Stand-in for the payment provider. Accepts every charge until told to
/// decline, and keeps the accepted ones.
#[derive(Debug, Default)]
pub struct SimulatedBillingGateway {
    declining: AtomicBool,
    charges: Mutex<Vec<Charge>>,
}

impl SimulatedBillingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_declining(&self, declining: bool) {
        self.declining.store(declining, Ordering::SeqCst);
    }

    pub async fn charges(&self) -> Vec<Charge> {
        self.charges.lock().await.clone()
    }

    async fn charge(&self, cyclist_id: &CyclistId, amount: &Money, kind: ChargeKind) -> bool {
        if self.declining.load(Ordering::SeqCst) {
            tracing::debug!(%cyclist_id, ?amount, ?kind, "charge declined");
            return false;
        }
        tracing::debug!(%cyclist_id, ?amount, ?kind, "charge accepted");
        self.charges.lock().await.push(Charge {
            cyclist_id: *cyclist_id,
            amount: *amount,
            kind,
        });
        true
    }
}

#[async_trait::async_trait]
impl BillingGateway for SimulatedBillingGateway {
    async fn charge_fixed(
        &self,
        cyclist_id: &CyclistId,
        amount: &Money,
    ) -> error_stack::Result<bool, KernelError> {
        Ok(self.charge(cyclist_id, amount, ChargeKind::Fixed).await)
    }

    async fn charge_extra(
        &self,
        cyclist_id: &CyclistId,
        amount: &Money,
    ) -> error_stack::Result<bool, KernelError> {
        Ok(self.charge(cyclist_id, amount, ChargeKind::Extra).await)
    }
}
