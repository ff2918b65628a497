use kernel::interface::update::{
    CardModifier, CyclistModifier, DependOnCardModifier, DependOnCyclistModifier,
    DependOnStaffModifier, StaffModifier,
};
use kernel::KernelError;

use crate::ledger::DependOnRentalLedger;

#[async_trait::async_trait]
pub trait RestoreService:
    'static
    + Sync
    + Send
    + DependOnCyclistModifier
    + DependOnCardModifier
    + DependOnStaffModifier
    + DependOnRentalLedger
{
    /// Drops every cyclist, card, staff member and rental. Rents already in
    /// flight still complete.
    async fn restore(&self) -> error_stack::Result<(), KernelError> {
        self.card_modifier().delete_all().await?;
        self.cyclist_modifier().delete_all().await?;
        self.staff_modifier().delete_all().await?;
        self.rental_ledger().clear();
        tracing::info!("all records cleared");
        Ok(())
    }
}

impl<T> RestoreService for T where
    T: DependOnCyclistModifier
        + DependOnCardModifier
        + DependOnStaffModifier
        + DependOnRentalLedger
{
}
