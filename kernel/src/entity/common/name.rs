use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

/// A full personal name: at least a given name and a family name.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct FullName(String);

impl FullName {
    pub fn parse(name: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let name = name.into();
        if name.split_whitespace().count() >= 2 {
            Ok(Self(name.trim().to_string()))
        } else {
            Err(Report::new(KernelError::Validation)
                .attach_printable(format!("full name required, got {name:?}")))
        }
    }
}
