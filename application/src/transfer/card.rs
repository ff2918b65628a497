use kernel::prelude::entity::{CreditCard, DestructCreditCard, FullName};
use time::Date;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct PutCardDto {
    pub cyclist_id: Uuid,
    pub holder: String,
    pub number: String,
    pub expiry: Date,
    pub cvv: String,
}

#[derive(Debug, Clone)]
pub struct GetCardDto {
    pub cyclist_id: Uuid,
}

/// Card as shown back to callers. The CVV never leaves the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDto {
    pub cyclist_id: Uuid,
    pub holder: String,
    pub number: String,
    pub expiry: Date,
}

impl From<CreditCard> for CardDto {
    fn from(value: CreditCard) -> Self {
        let DestructCreditCard {
            cyclist_id,
            holder,
            number,
            expiry,
            cvv: _,
        } = value.into_destruct();
        Self {
            cyclist_id: cyclist_id.into(),
            holder: FullName::from(holder).into(),
            number: number.into(),
            expiry: expiry.into(),
        }
    }
}
