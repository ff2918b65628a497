use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CyclistStatus {
    Inactive,
    Active,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct RentalPermission(bool);

impl RentalPermission {
    pub fn new(granted: impl Into<bool>) -> Self {
        Self(granted.into())
    }
}

/// What the rental engine needs to know about a cyclist before opening a rental.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct Eligibility {
    exists: bool,
    active: bool,
    has_rental_permission: bool,
}

impl Eligibility {
    pub fn new(exists: bool, active: bool, has_rental_permission: bool) -> Self {
        Self {
            exists,
            active,
            has_rental_permission,
        }
    }

    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn exists(&self) -> bool {
        self.exists
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn has_rental_permission(&self) -> bool {
        self.has_rental_permission
    }

    pub fn is_eligible(&self) -> bool {
        self.exists && self.active && self.has_rental_permission
    }
}
