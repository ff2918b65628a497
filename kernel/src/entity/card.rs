mod detail;

pub use self::detail::*;
use crate::entity::CyclistId;
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

/// Credit card on file for a cyclist. Each cyclist holds at most one.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Destructure, References)]
pub struct CreditCard {
    cyclist_id: CyclistId,
    holder: CardHolder,
    number: CardNumber,
    expiry: CardExpiry,
    cvv: Cvv,
}

impl CreditCard {
    pub fn new(
        cyclist_id: CyclistId,
        holder: CardHolder,
        number: CardNumber,
        expiry: CardExpiry,
        cvv: Cvv,
    ) -> Self {
        Self {
            cyclist_id,
            holder,
            number,
            expiry,
            cvv,
        }
    }
}
