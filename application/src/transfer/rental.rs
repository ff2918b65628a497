use kernel::prelude::entity::{DestructRental, Rental};
use rust_decimal::Decimal;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct RentalDto {
    pub id: Uuid,
    pub cyclist_id: Uuid,
    pub start_lock_id: Uuid,
    pub bike_id: Uuid,
    pub started_at: OffsetDateTime,
    pub end_lock_id: Option<Uuid>,
    pub ended_at: Option<OffsetDateTime>,
    pub fixed_fee: Decimal,
    pub extra_fee: Decimal,
}

impl From<Rental> for RentalDto {
    fn from(value: Rental) -> Self {
        let DestructRental {
            id,
            cyclist_id,
            start_lock_id,
            bike_id,
            started_at,
            end_lock_id,
            ended_at,
            fixed_fee,
            extra_fee,
        } = value.into_destruct();
        Self {
            id: id.into(),
            cyclist_id: cyclist_id.into(),
            start_lock_id: start_lock_id.into(),
            bike_id: bike_id.into(),
            started_at: started_at.into(),
            end_lock_id: end_lock_id.map(Into::into),
            ended_at: ended_at.map(Into::into),
            fixed_fee: fixed_fee.into(),
            extra_fee: extra_fee.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateRentalDto {
    pub cyclist_id: Uuid,
    pub start_lock_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct ReturnBikeDto {
    pub end_lock_id: Uuid,
    pub bike_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct GetActiveRentalDto {
    pub cyclist_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct GetRentalDto {
    pub id: Uuid,
}
