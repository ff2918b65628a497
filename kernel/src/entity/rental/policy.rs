use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vodca::References;

use crate::entity::{EndedAt, Money, StartedAt};

const MINUTES_PER_HOUR: i64 = 60;

/// Pricing applied by the rental engine.
///
/// A rental pays `fixed_fee` up front. On return, every *whole* hour past the
/// first `included_minutes` is charged at `extra_fee_per_hour`; partial hours
/// are not charged, so with the defaults a 61 to 119 minute ride costs nothing
/// extra and a 120 minute ride costs one hour.
#[derive(Debug, Clone, Eq, PartialEq, References, Serialize, Deserialize)]
pub struct RentalPolicy {
    fixed_fee: Money,
    extra_fee_per_hour: Money,
    included_minutes: i64,
}

impl RentalPolicy {
    pub fn new(fixed_fee: Money, extra_fee_per_hour: Money, included_minutes: i64) -> Self {
        Self {
            fixed_fee,
            extra_fee_per_hour,
            included_minutes,
        }
    }

    pub fn extra_fee(&self, started_at: &StartedAt, ended_at: &EndedAt) -> Money {
        let minutes = ended_at.minutes_since(started_at);
        if minutes <= self.included_minutes {
            return Money::ZERO;
        }
        let extra_hours = (minutes - self.included_minutes) / MINUTES_PER_HOUR;
        self.extra_fee_per_hour.times(extra_hours)
    }
}

impl Default for RentalPolicy {
    fn default() -> Self {
        Self {
            fixed_fee: Money::new(Decimal::new(1000, 2)),
            extra_fee_per_hour: Money::new(Decimal::new(500, 2)),
            included_minutes: MINUTES_PER_HOUR,
        }
    }
}
