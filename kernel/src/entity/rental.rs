mod dock;
mod id;
mod moment;
mod policy;

pub use self::{dock::*, id::*, moment::*, policy::*};
use crate::entity::{CyclistId, Money};
use crate::KernelError;
use destructure::Destructure;
use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::References;

/// One rent-to-return transaction.
///
/// A rental is `Active` from creation until [`Rental::close`] stamps its end,
/// after which it is terminal and no field changes again.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Serialize, Deserialize)]
pub struct Rental {
    id: RentalId,
    cyclist_id: CyclistId,
    start_lock_id: LockId,
    bike_id: BikeId,
    started_at: StartedAt,
    end_lock_id: Option<LockId>,
    ended_at: Option<EndedAt>,
    fixed_fee: Money,
    extra_fee: Money,
}

impl Rental {
    pub fn open(
        id: RentalId,
        cyclist_id: CyclistId,
        start_lock_id: LockId,
        bike_id: BikeId,
        started_at: StartedAt,
        fixed_fee: Money,
    ) -> Self {
        Self {
            id,
            cyclist_id,
            start_lock_id,
            bike_id,
            started_at,
            end_lock_id: None,
            ended_at: None,
            fixed_fee,
            extra_fee: Money::ZERO,
        }
    }

    pub fn is_active(&self) -> bool {
        self.ended_at.is_none()
    }

    /// Stamps the return and prices the extra time. Fails if already closed.
    pub fn close(
        &mut self,
        end_lock_id: LockId,
        ended_at: EndedAt,
        policy: &RentalPolicy,
    ) -> error_stack::Result<(), KernelError> {
        if let Some(ended_at) = &self.ended_at {
            return Err(Report::new(KernelError::Internal).attach_printable(format!(
                "rental {:?} was already closed at {:?}",
                self.id, ended_at
            )));
        }
        self.extra_fee = policy.extra_fee(&self.started_at, &ended_at);
        self.end_lock_id = Some(end_lock_id);
        self.ended_at = Some(ended_at);
        Ok(())
    }
}
