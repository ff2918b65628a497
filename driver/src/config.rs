use std::str::FromStr;

use kernel::prelude::entity::{Money, RentalPolicy};
use kernel::KernelError;
use rust_decimal::Decimal;

use crate::env;
use crate::error::{ConvertError, DriverError};

pub static RENTAL_FIXED_FEE: &str = "RENTAL_FIXED_FEE";
pub static RENTAL_EXTRA_FEE_PER_HOUR: &str = "RENTAL_EXTRA_FEE_PER_HOUR";
pub static RENTAL_INCLUDED_MINUTES: &str = "RENTAL_INCLUDED_MINUTES";

/// Reads the fee policy from the environment (and `.env`, if present).
/// Unset variables keep the defaults of [`RentalPolicy::default`].
pub fn load_rental_policy() -> error_stack::Result<RentalPolicy, KernelError> {
    rental_policy_from(env).convert_error()
}

pub(crate) fn rental_policy_from<F>(lookup: F) -> Result<RentalPolicy, DriverError>
where
    F: Fn(&str) -> Result<String, DriverError>,
{
    let defaults = RentalPolicy::default();
    let fixed_fee = read(&lookup, RENTAL_FIXED_FEE, |fee: &Decimal| !fee.is_sign_negative())?
        .map(Money::new)
        .unwrap_or(*defaults.fixed_fee());
    let extra_fee_per_hour = read(&lookup, RENTAL_EXTRA_FEE_PER_HOUR, |fee: &Decimal| {
        !fee.is_sign_negative()
    })?
    .map(Money::new)
    .unwrap_or(*defaults.extra_fee_per_hour());
    let included_minutes = read(&lookup, RENTAL_INCLUDED_MINUTES, |minutes: &i64| *minutes >= 0)?
        .unwrap_or(*defaults.included_minutes());

    Ok(RentalPolicy::new(
        fixed_fee,
        extra_fee_per_hour,
        included_minutes,
    ))
}

fn read<F, T>(
    lookup: &F,
    key: &'static str,
    accept: impl Fn(&T) -> bool,
) -> Result<Option<T>, DriverError>
where
    F: Fn(&str) -> Result<String, DriverError>,
    T: FromStr,
{
    let raw = match lookup(key) {
        Ok(raw) => raw,
        Err(error) if error.is_missing_var() => return Ok(None),
        Err(error) => return Err(error),
    };
    match raw.trim().parse::<T>() {
        Ok(value) if accept(&value) => Ok(Some(value)),
        _ => Err(DriverError::InvalidConfig { key, value: raw }),
    }
}
