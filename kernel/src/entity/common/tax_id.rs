use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

const CPF_DIGITS: usize = 11;

/// Brazilian individual taxpayer number (CPF), stored as its 11 digits.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct Cpf(String);

impl Cpf {
    pub fn parse(cpf: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let cpf = cpf.into();
        if cpf.len() == CPF_DIGITS && cpf.chars().all(|c| c.is_ascii_digit()) {
            Ok(Self(cpf))
        } else {
            Err(Report::new(KernelError::Validation)
                .attach_printable(format!("CPF must be {CPF_DIGITS} digits")))
        }
    }
}
