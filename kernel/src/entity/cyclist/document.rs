use error_stack::Report;
use serde::{Deserialize, Serialize};
use time::Date;
use vodca::{AsRefln, Fromln, References};

use crate::entity::Cpf;
use crate::KernelError;

const BRAZILIAN_NATIONALITY: &str = "brasileira";
const BRAZIL: &str = "brasil";

#[derive(Debug, Clone, Eq, PartialEq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct Nationality(String);

impl Nationality {
    pub fn new(nationality: impl Into<String>) -> Self {
        Self(nationality.into())
    }

    pub fn is_brazilian(&self) -> bool {
        self.0.trim().eq_ignore_ascii_case(BRAZILIAN_NATIONALITY)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash, References, Serialize, Deserialize)]
pub struct Passport {
    number: String,
    expires_on: Date,
    country: String,
}

impl Passport {
    pub fn new(number: impl Into<String>, expires_on: Date, country: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            expires_on,
            country: country.into(),
        }
    }
}

/// Brazilians identify with a CPF; everyone else with a valid foreign passport.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum IdentityDocument {
    Brazilian {
        cpf: Cpf,
    },
    Foreign {
        nationality: Nationality,
        passport: Passport,
    },
}

impl IdentityDocument {
    pub fn resolve(
        nationality: Nationality,
        cpf: Option<String>,
        passport: Option<Passport>,
        today: Date,
    ) -> error_stack::Result<Self, KernelError> {
        if nationality.is_brazilian() {
            let cpf = cpf.ok_or_else(|| {
                Report::new(KernelError::Validation)
                    .attach_printable("brazilian cyclists must provide a CPF")
            })?;
            return Ok(Self::Brazilian {
                cpf: Cpf::parse(cpf)?,
            });
        }

        let passport = passport.ok_or_else(|| {
            Report::new(KernelError::Validation)
                .attach_printable("foreign cyclists must provide a passport")
        })?;
        if passport.country.trim().eq_ignore_ascii_case(BRAZIL) {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("a foreign nationality cannot hold a brazilian passport"));
        }
        if passport.number.trim().is_empty() {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("passport number is empty"));
        }
        if passport.expires_on <= today {
            return Err(Report::new(KernelError::Validation)
                .attach_printable(format!("passport expired on {}", passport.expires_on)));
        }
        Ok(Self::Foreign {
            nationality,
            passport,
        })
    }

    pub fn nationality(&self) -> Nationality {
        match self {
            IdentityDocument::Brazilian { .. } => Nationality::new(BRAZILIAN_NATIONALITY),
            IdentityDocument::Foreign { nationality, .. } => nationality.clone(),
        }
    }
}
