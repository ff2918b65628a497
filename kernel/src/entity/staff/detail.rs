use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vodca::{AsRefln, Fromln};

/// Staff registration number.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Default, Fromln, AsRefln, Serialize, Deserialize)]
pub struct StaffId(Uuid);

impl StaffId {
    pub fn new(id: impl Into<Uuid>) -> Self {
        Self(id.into())
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct StaffAge(u8);

impl StaffAge {
    pub fn new(age: impl Into<u8>) -> Self {
        Self(age.into())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct StaffRole(String);

impl StaffRole {
    pub fn new(role: impl Into<String>) -> Self {
        Self(role.into())
    }
}
