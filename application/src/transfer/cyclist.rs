use kernel::prelude::entity::{Cyclist, CyclistStatus, DestructCyclist, IdentityDocument};
use time::Date;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassportDto {
    pub number: String,
    pub expires_on: Date,
    pub country: String,
}

/// Fields a cyclist fills in on registration and on every profile update.
#[derive(Debug, Clone)]
pub struct CyclistProfileDto {
    pub email: String,
    pub nationality: String,
    pub cpf: Option<String>,
    pub passport: Option<PassportDto>,
    pub name: String,
    pub birth_date: Date,
    pub password: String,
    pub password_confirmation: String,
    pub photo_url: Option<String>,
}

pub type CreateCyclistDto = CyclistProfileDto;

#[derive(Debug, Clone)]
pub struct UpdateCyclistDto {
    pub id: Uuid,
    pub profile: CyclistProfileDto,
}

#[derive(Debug, Clone)]
pub struct GetCyclistDto {
    pub id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CyclistDto {
    pub id: Uuid,
    pub email: String,
    pub nationality: String,
    pub cpf: Option<String>,
    pub passport: Option<PassportDto>,
    pub name: String,
    pub birth_date: Date,
    pub photo_url: Option<String>,
    pub active: bool,
    pub rental_permission: bool,
}

impl From<Cyclist> for CyclistDto {
    fn from(value: Cyclist) -> Self {
        let nationality = value.document().nationality().into();
        let DestructCyclist {
            id,
            email,
            document,
            name,
            birth_date,
            password: _,
            photo_url,
            status,
            rental_permission,
        } = value.into_destruct();
        let (cpf, passport): (Option<String>, Option<PassportDto>) = match document {
            IdentityDocument::Brazilian { cpf } => (Some(cpf.into()), None),
            IdentityDocument::Foreign { passport, .. } => (
                None,
                Some(PassportDto {
                    number: passport.number().clone(),
                    expires_on: *passport.expires_on(),
                    country: passport.country().clone(),
                }),
            ),
        };
        Self {
            id: id.into(),
            email: email.into(),
            nationality,
            cpf,
            passport,
            name: name.into(),
            birth_date: birth_date.into(),
            photo_url: photo_url.map(Into::into),
            active: status == CyclistStatus::Active,
            rental_permission: rental_permission.into(),
        }
    }
}
