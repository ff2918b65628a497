use kernel::prelude::entity::{DestructStaff, Staff};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct StaffProfileDto {
    pub email: String,
    pub name: String,
    pub age: u8,
    pub role: String,
    pub cpf: String,
    pub password: String,
    pub password_confirmation: String,
}

pub type CreateStaffDto = StaffProfileDto;

#[derive(Debug, Clone)]
pub struct UpdateStaffDto {
    pub id: Uuid,
    pub profile: StaffProfileDto,
}

#[derive(Debug, Clone)]
pub struct GetStaffDto {
    pub id: Uuid,
}

#[derive(Debug, Clone)]
pub struct DeleteStaffDto {
    pub id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffDto {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub age: u8,
    pub role: String,
    pub cpf: String,
}

impl From<Staff> for StaffDto {
    fn from(value: Staff) -> Self {
        let DestructStaff {
            id,
            email,
            name,
            age,
            role,
            cpf,
            password: _,
        } = value.into_destruct();
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
            age: age.into(),
            role: role.into(),
            cpf: cpf.into(),
        }
    }
}
