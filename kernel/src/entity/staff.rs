mod detail;

pub use self::detail::*;
use crate::entity::{Cpf, Email, FullName, Password};
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Destructure, References)]
pub struct Staff {
    id: StaffId,
    email: Email,
    name: FullName,
    age: StaffAge,
    role: StaffRole,
    cpf: Cpf,
    password: Password,
}

impl Staff {
    pub fn new(
        id: StaffId,
        email: Email,
        name: FullName,
        age: StaffAge,
        role: StaffRole,
        cpf: Cpf,
        password: Password,
    ) -> Self {
        Self {
            id,
            email,
            name,
            age,
            role,
            cpf,
            password,
        }
    }
}
