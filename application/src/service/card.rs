use error_stack::Report;
use kernel::interface::gateway::{Clock, DependOnClock};
use kernel::interface::query::{CardQuery, CyclistQuery, DependOnCardQuery, DependOnCyclistQuery};
use kernel::interface::update::{CardModifier, DependOnCardModifier};
use kernel::prelude::entity::{CardExpiry, CardHolder, CardNumber, CreditCard, Cvv, CyclistId};
use kernel::KernelError;

use crate::transfer::{CardDto, GetCardDto, PutCardDto};

async fn ensure_cyclist<Q: CyclistQuery>(
    query: &Q,
    id: &CyclistId,
) -> error_stack::Result<(), KernelError> {
    match query.find_by_id(id).await? {
        Some(_) => Ok(()),
        None => Err(Report::new(KernelError::NotFound)
            .attach_printable(format!("cyclist {id} not found"))),
    }
}

#[async_trait::async_trait]
pub trait GetCardService: 'static + Sync + Send + DependOnCyclistQuery + DependOnCardQuery {
    async fn get_card(&self, dto: GetCardDto) -> error_stack::Result<CardDto, KernelError> {
        let cyclist_id = CyclistId::new(dto.cyclist_id);
        ensure_cyclist(self.cyclist_query(), &cyclist_id).await?;
        let card = self
            .card_query()
            .find_by_cyclist_id(&cyclist_id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("cyclist {cyclist_id} has no card on file"))
            })?;
        Ok(CardDto::from(card))
    }
}

impl<T> GetCardService for T where T: DependOnCyclistQuery + DependOnCardQuery {}

#[async_trait::async_trait]
pub trait HandleCardService:
    'static + Sync + Send + DependOnCyclistQuery + DependOnCardModifier + DependOnClock
{
    /// Stores the cyclist's card, replacing any previous one.
    #[tracing::instrument(skip_all, fields(cyclist_id = %dto.cyclist_id))]
    async fn put_card(&self, dto: PutCardDto) -> error_stack::Result<CardDto, KernelError> {
        let cyclist_id = CyclistId::new(dto.cyclist_id);
        ensure_cyclist(self.cyclist_query(), &cyclist_id).await?;

        let today = self.clock().now().date();
        let card = CreditCard::new(
            cyclist_id,
            CardHolder::parse(dto.holder)?,
            CardNumber::parse(dto.number)?,
            CardExpiry::parse(dto.expiry, today)?,
            Cvv::parse(dto.cvv)?,
        );
        self.card_modifier().upsert(&card).await?;
        tracing::info!(card = card.number().last_digits(), "card stored");

        Ok(CardDto::from(card))
    }
}

impl<T> HandleCardService for T where
    T: DependOnCyclistQuery + DependOnCardModifier + DependOnClock
{
}
