use error_stack::{Report, ResultExt};
use serde::{Deserialize, Serialize};
use time::Date;
use vodca::{AsRefln, Fromln};

use crate::entity::FullName;
use crate::KernelError;

const CARD_NUMBER_DIGITS: usize = 16;
const CVV_DIGITS: usize = 3;

fn all_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

#[derive(Debug, Clone, Eq, PartialEq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct CardHolder(FullName);

impl CardHolder {
    pub fn parse(holder: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        FullName::parse(holder)
            .map(Self)
            .attach_printable_lazy(|| "card holder must be a full name")
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct CardNumber(String);

impl CardNumber {
    pub fn parse(number: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let number = number.into();
        if all_digits(&number, CARD_NUMBER_DIGITS) {
            Ok(Self(number))
        } else {
            Err(Report::new(KernelError::Validation).attach_printable(format!(
                "card number must be {CARD_NUMBER_DIGITS} digits"
            )))
        }
    }

    pub fn last_digits(&self) -> &str {
        &self.0[self.0.len() - 4..]
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct CardExpiry(Date);

impl CardExpiry {
    /// The card must still be valid after `today`.
    pub fn parse(expiry: Date, today: Date) -> error_stack::Result<Self, KernelError> {
        if expiry > today {
            Ok(Self(expiry))
        } else {
            Err(Report::new(KernelError::Validation)
                .attach_printable(format!("card expired on {expiry}")))
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct Cvv(String);

impl Cvv {
    pub fn parse(cvv: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let cvv = cvv.into();
        if all_digits(&cvv, CVV_DIGITS) {
            Ok(Self(cvv))
        } else {
            Err(Report::new(KernelError::Validation)
                .attach_printable(format!("CVV must be {CVV_DIGITS} digits")))
        }
    }
}

impl std::fmt::Debug for Cvv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Cvv(***)")
    }
}

#[cfg(test)]
mod test {
    use time::macros::date;

    use super::{CardExpiry, CardHolder, CardNumber, Cvv};

    #[test]
    fn card_number_is_sixteen_digits() {
        let number = CardNumber::parse("4111111111111111").unwrap();
        assert_eq!(number.last_digits(), "1111");
        assert!(CardNumber::parse("41111111111").is_err());
        assert!(CardNumber::parse("4111-1111-1111-1111").is_err());
    }

    #[test]
    fn cvv_is_three_digits() {
        assert!(Cvv::parse("123").is_ok());
        assert!(Cvv::parse("12a").is_err());
        assert!(Cvv::parse("1234").is_err());
    }

    #[test]
    fn expiry_must_be_in_the_future() {
        let today = date!(2024 - 03 - 10);
        assert!(CardExpiry::parse(date!(2024 - 03 - 11), today).is_ok());
        assert!(CardExpiry::parse(today, today).is_err());
    }

    #[test]
    fn holder_is_a_full_name() {
        assert!(CardHolder::parse("Ana Souza").is_ok());
        assert!(CardHolder::parse("Ana").is_err());
    }
}
