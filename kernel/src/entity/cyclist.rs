mod document;
mod id;
mod profile;
mod status;

pub use self::{document::*, id::*, profile::*, status::*};
use crate::entity::{Email, FullName, Password};
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Destructure, References)]
pub struct Cyclist {
    id: CyclistId,
    email: Email,
    document: IdentityDocument,
    name: FullName,
    birth_date: BirthDate,
    password: Password,
    photo_url: Option<PhotoUrl>,
    status: CyclistStatus,
    rental_permission: RentalPermission,
}

impl Cyclist {
    /// A freshly registered cyclist is inactive and may not rent yet.
    pub fn register(
        id: CyclistId,
        email: Email,
        document: IdentityDocument,
        name: FullName,
        birth_date: BirthDate,
        password: Password,
        photo_url: Option<PhotoUrl>,
    ) -> Self {
        Self {
            id,
            email,
            document,
            name,
            birth_date,
            password,
            photo_url,
            status: CyclistStatus::Inactive,
            rental_permission: RentalPermission::new(false),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: CyclistId,
        email: Email,
        document: IdentityDocument,
        name: FullName,
        birth_date: BirthDate,
        password: Password,
        photo_url: Option<PhotoUrl>,
        status: CyclistStatus,
        rental_permission: RentalPermission,
    ) -> Self {
        Self {
            id,
            email,
            document,
            name,
            birth_date,
            password,
            photo_url,
            status,
            rental_permission,
        }
    }

    pub fn change_profile(
        &mut self,
        email: Email,
        document: IdentityDocument,
        name: FullName,
        birth_date: BirthDate,
        password: Password,
        photo_url: Option<PhotoUrl>,
    ) {
        self.email = email;
        self.document = document;
        self.name = name;
        self.birth_date = birth_date;
        self.password = password;
        self.photo_url = photo_url;
    }

    pub fn activate(&mut self) {
        self.status = CyclistStatus::Active;
    }

    pub fn grant_rental_permission(&mut self) {
        self.rental_permission = RentalPermission::new(true);
    }

    pub fn eligibility(&self) -> Eligibility {
        Eligibility::new(
            true,
            self.status == CyclistStatus::Active,
            *self.rental_permission.as_ref(),
        )
    }
}
