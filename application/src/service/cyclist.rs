use error_stack::Report;
use kernel::interface::gateway::{Clock, DependOnClock};
use kernel::interface::query::{CyclistQuery, DependOnCyclistQuery};
use kernel::interface::update::{CyclistModifier, DependOnCyclistModifier};
use kernel::prelude::entity::{
    BirthDate, Cyclist, CyclistId, Email, FullName, IdentityDocument, Nationality, Passport,
    Password, PhotoUrl,
};
use kernel::KernelError;
use time::Date;
use uuid::Uuid;

use crate::ledger::DependOnRentalLedger;
use crate::transfer::{
    CreateCyclistDto, CyclistDto, CyclistProfileDto, GetCyclistDto, UpdateCyclistDto,
};

struct ValidProfile {
    document: IdentityDocument,
    name: FullName,
    birth_date: BirthDate,
    password: Password,
    photo_url: Option<PhotoUrl>,
}

/// Everything after the email checks, in the order registration reports it.
fn validate_profile(
    profile: CyclistProfileDto,
    today: Date,
) -> error_stack::Result<ValidProfile, KernelError> {
    let passport = profile
        .passport
        .map(|passport| Passport::new(passport.number, passport.expires_on, passport.country));
    let document = IdentityDocument::resolve(
        Nationality::new(profile.nationality),
        profile.cpf,
        passport,
        today,
    )?;
    let name = FullName::parse(profile.name)?;
    let password = Password::parse(profile.password, profile.password_confirmation)?;
    Ok(ValidProfile {
        document,
        name,
        birth_date: BirthDate::new(profile.birth_date),
        password,
        photo_url: profile.photo_url.map(PhotoUrl::new),
    })
}

async fn find_cyclist<Q: CyclistQuery>(
    query: &Q,
    id: &CyclistId,
) -> error_stack::Result<Cyclist, KernelError> {
    query.find_by_id(id).await?.ok_or_else(|| {
        Report::new(KernelError::NotFound).attach_printable(format!("cyclist {id} not found"))
    })
}

async fn ensure_email_free<Q: CyclistQuery>(
    query: &Q,
    email: &Email,
) -> error_stack::Result<(), KernelError> {
    if query.find_by_email(email.as_str()).await?.is_some() {
        return Err(Report::new(KernelError::Conflict)
            .attach_printable(format!("email {} is already registered", email.as_str())));
    }
    Ok(())
}

#[async_trait::async_trait]
pub trait HandleCyclistService:
    'static + Sync + Send + DependOnCyclistQuery + DependOnCyclistModifier + DependOnClock
{
    #[tracing::instrument(skip_all)]
    async fn register_cyclist(
        &self,
        dto: CreateCyclistDto,
    ) -> error_stack::Result<CyclistDto, KernelError> {
        let email = Email::parse(dto.email.clone())?;
        ensure_email_free(self.cyclist_query(), &email).await?;
        let profile = validate_profile(dto, self.clock().now().date())?;

        let cyclist = Cyclist::register(
            CyclistId::new(Uuid::new_v4()),
            email,
            profile.document,
            profile.name,
            profile.birth_date,
            profile.password,
            profile.photo_url,
        );
        self.cyclist_modifier().create(&cyclist).await?;
        tracing::info!(cyclist_id = %cyclist.id(), "cyclist registered");

        Ok(CyclistDto::from(cyclist))
    }

    #[tracing::instrument(skip_all, fields(cyclist_id = %dto.id))]
    async fn update_cyclist(
        &self,
        dto: UpdateCyclistDto,
    ) -> error_stack::Result<CyclistDto, KernelError> {
        let id = CyclistId::new(dto.id);
        let mut cyclist = find_cyclist(self.cyclist_query(), &id).await?;

        let email = if cyclist.email().matches(&dto.profile.email) {
            cyclist.email().clone()
        } else {
            let email = Email::parse(dto.profile.email.clone())?;
            ensure_email_free(self.cyclist_query(), &email).await?;
            email
        };
        let profile = validate_profile(dto.profile, self.clock().now().date())?;

        cyclist.change_profile(
            email,
            profile.document,
            profile.name,
            profile.birth_date,
            profile.password,
            profile.photo_url,
        );
        self.cyclist_modifier().update(&cyclist).await?;

        Ok(CyclistDto::from(cyclist))
    }

    async fn activate_cyclist(
        &self,
        dto: GetCyclistDto,
    ) -> error_stack::Result<CyclistDto, KernelError> {
        let id = CyclistId::new(dto.id);
        let mut cyclist = find_cyclist(self.cyclist_query(), &id).await?;
        cyclist.activate();
        self.cyclist_modifier().update(&cyclist).await?;
        tracing::info!(cyclist_id = %id, "cyclist activated");
        Ok(CyclistDto::from(cyclist))
    }

    async fn grant_rental_permission(
        &self,
        dto: GetCyclistDto,
    ) -> error_stack::Result<CyclistDto, KernelError> {
        let id = CyclistId::new(dto.id);
        let mut cyclist = find_cyclist(self.cyclist_query(), &id).await?;
        cyclist.grant_rental_permission();
        self.cyclist_modifier().update(&cyclist).await?;
        tracing::info!(cyclist_id = %id, "rental permission granted");
        Ok(CyclistDto::from(cyclist))
    }
}

impl<T> HandleCyclistService for T where
    T: DependOnCyclistQuery + DependOnCyclistModifier + DependOnClock
{
}

#[async_trait::async_trait]
pub trait GetCyclistService:
    'static + Sync + Send + DependOnCyclistQuery + DependOnRentalLedger
{
    async fn get_cyclist(
        &self,
        dto: GetCyclistDto,
    ) -> error_stack::Result<Option<CyclistDto>, KernelError> {
        let id = CyclistId::new(dto.id);
        let cyclist = self.cyclist_query().find_by_id(&id).await?;
        Ok(cyclist.map(CyclistDto::from))
    }

    async fn list_cyclists(&self) -> error_stack::Result<Vec<CyclistDto>, KernelError> {
        let cyclists = self.cyclist_query().find_all().await?;
        Ok(cyclists.into_iter().map(CyclistDto::from).collect())
    }

    async fn email_exists(&self, email: String) -> error_stack::Result<bool, KernelError> {
        let email = Email::parse(email)?;
        let found = self.cyclist_query().find_by_email(email.as_str()).await?;
        Ok(found.is_some())
    }

    async fn can_rent(&self, dto: GetCyclistDto) -> error_stack::Result<bool, KernelError> {
        let id = CyclistId::new(dto.id);
        let cyclist = find_cyclist(self.cyclist_query(), &id).await?;
        Ok(cyclist.eligibility().is_eligible())
    }

    /// The bike the cyclist is riding right now, if any.
    async fn rented_bike(&self, dto: GetCyclistDto) -> error_stack::Result<Option<Uuid>, KernelError> {
        let id = CyclistId::new(dto.id);
        find_cyclist(self.cyclist_query(), &id).await?;
        let rental = self.rental_ledger().find_active(&id);
        Ok(rental.map(|rental| (*rental.bike_id()).into()))
    }
}

impl<T> GetCyclistService for T where T: DependOnCyclistQuery + DependOnRentalLedger {}
