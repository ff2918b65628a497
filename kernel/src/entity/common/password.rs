use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Clone, Eq, PartialEq, Fromln, AsRefln, Serialize, Deserialize)]
pub struct Password(String);

impl Password {
    /// Both entries must match; at least six characters with one lowercase
    /// and one uppercase letter.
    pub fn parse(
        password: impl Into<String>,
        confirmation: impl AsRef<str>,
    ) -> error_stack::Result<Self, KernelError> {
        let password = password.into();
        if password != confirmation.as_ref() {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("password confirmation does not match"));
        }
        let strong = password.chars().count() >= MIN_PASSWORD_LENGTH
            && password.chars().any(|c| c.is_lowercase())
            && password.chars().any(|c| c.is_uppercase());
        if !strong {
            return Err(Report::new(KernelError::Validation).attach_printable(
                "password needs at least 6 characters with upper and lower case letters",
            ));
        }
        Ok(Self(password))
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}
