use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Accepts `local@domain.tld`: local part of word characters and `._%+-`,
    /// domain of word characters and `.-`, and a 2 to 6 letter ASCII TLD.
    pub fn parse(email: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let email = email.into();
        if is_well_formed(&email) {
            Ok(Self(email))
        } else {
            Err(Report::new(KernelError::Validation)
                .attach_printable(format!("malformed email address: {email:?}")))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_well_formed(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !local.is_empty()
        && local.chars().all(|c| is_word(c) || "._%+-".contains(c))
        && !host.is_empty()
        && host.chars().all(|c| is_word(c) || c == '.' || c == '-')
        && (2..=6).contains(&tld.len())
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}
