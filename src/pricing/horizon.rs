//! Horizon projection: one base rate expanded into every reported time horizon

use crate::error::Result;
use crate::money::{self, Money};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Hours in a day
pub const HOURS_PER_DAY: Decimal = dec!(24);

/// Billing hours in a month
pub const HOURS_PER_MONTH: Decimal = dec!(730);

/// Billing months in a year
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Days in a (non-leap) year
pub const DAYS_PER_YEAR: Decimal = dec!(365);

/// Length of the multi-year term in years
pub const TERM_YEARS: Decimal = dec!(3);

/// Base price of one item as supplied by the rate provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseRate {
    pub hourly: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_time_year1: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_time_year3: Option<Money>,
}

impl BaseRate {
    pub fn hourly(hourly: Money) -> Self {
        Self {
            hourly,
            one_time_year1: None,
            one_time_year3: None,
        }
    }

    pub fn with_one_time(mut self, year1: Option<Money>, year3: Option<Money>) -> Self {
        self.one_time_year1 = year1;
        self.one_time_year3 = year3;
        self
    }

    /// Rate for `quantity` identical units
    pub fn scaled(&self, quantity: u32) -> Result<Self> {
        let factor = Decimal::from(quantity);
        let scale = |value: Option<Money>| value.map(|v| money::mul(v, factor)).transpose();

        Ok(Self {
            hourly: money::mul(self.hourly, factor)?,
            one_time_year1: scale(self.one_time_year1)?,
            one_time_year3: scale(self.one_time_year3)?,
        })
    }
}

/// Cost of an item (or a group of items) over every reported horizon
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingHorizon {
    pub one_time_year1: Money,
    pub one_time_year3: Money,
    pub hourly: Money,
    pub daily: Money,
    pub monthly: Money,
    pub yearly: Money,
    pub year_one: Money,
    pub year_three: Money,
}

impl PricingHorizon {
    /// All-zero horizon
    pub fn zero() -> Self {
        Self::default()
    }

    /// Project an hourly rate and optional one-time fees onto every horizon
    ///
    /// - Daily: hourly * 24
    /// - Monthly: hourly * 730
    /// - Yearly: (hourly * 24 * 365) + one-time 1yr
    /// - Year one: yearly + one-time 3yr
    /// - Year three: (yearly * 3) + one-time 3yr
    ///
    /// One-time fees never enter the hourly, daily or monthly figures.
    pub fn project(
        hourly: Money,
        one_time_year1: Option<Money>,
        one_time_year3: Option<Money>,
    ) -> Result<Self> {
        let hourly = hourly.ensure_non_negative("hourly rate")?;
        let one_time_year1 = one_time_year1
            .unwrap_or(Money::ZERO)
            .ensure_non_negative("one-time 1yr fee")?;
        let one_time_year3 = one_time_year3
            .unwrap_or(Money::ZERO)
            .ensure_non_negative("one-time 3yr fee")?;

        let daily = money::mul(hourly, HOURS_PER_DAY)?;
        let monthly = money::mul(hourly, HOURS_PER_MONTH)?;
        let recurring_year = money::mul(daily, DAYS_PER_YEAR)?;
        let yearly = money::add(recurring_year, one_time_year1)?;
        let year_one = money::add(yearly, one_time_year3)?;
        let year_three = money::add(money::mul(yearly, TERM_YEARS)?, one_time_year3)?;

        Ok(Self {
            one_time_year1,
            one_time_year3,
            hourly,
            daily,
            monthly,
            yearly,
            year_one,
            year_three,
        })
    }

    /// Project a provider rate
    pub fn from_rate(rate: &BaseRate) -> Result<Self> {
        Self::project(rate.hourly, rate.one_time_year1, rate.one_time_year3)
    }

    /// Field-by-field sum with another horizon
    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        Ok(Self {
            one_time_year1: money::add(self.one_time_year1, other.one_time_year1)?,
            one_time_year3: money::add(self.one_time_year3, other.one_time_year3)?,
            hourly: money::add(self.hourly, other.hourly)?,
            daily: money::add(self.daily, other.daily)?,
            monthly: money::add(self.monthly, other.monthly)?,
            yearly: money::add(self.yearly, other.yearly)?,
            year_one: money::add(self.year_one, other.year_one)?,
            year_three: money::add(self.year_three, other.year_three)?,
        })
    }

    /// Values in report column order
    pub fn columns(&self) -> [Money; 8] {
        [
            self.one_time_year1,
            self.one_time_year3,
            self.hourly,
            self.daily,
            self.monthly,
            self.yearly,
            self.year_one,
            self.year_three,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PricingError;
    use proptest::prelude::*;

    fn m(value: Decimal) -> Money {
        Money::new(value)
    }

    #[test]
    fn test_project_hourly_only() {
        let horizon = PricingHorizon::project(m(dec!(1.00)), None, None).unwrap();

        assert_eq!(horizon.hourly, m(dec!(1)));
        assert_eq!(horizon.daily, m(dec!(24)));
        assert_eq!(horizon.monthly, m(dec!(730)));
        assert_eq!(horizon.yearly, m(dec!(8760)));
        assert_eq!(horizon.year_one, m(dec!(8760)));
        assert_eq!(horizon.year_three, m(dec!(26280)));
        assert!(horizon.one_time_year1.is_zero());
        assert!(horizon.one_time_year3.is_zero());
    }

    #[test]
    fn test_one_time_fees_stay_out_of_recurring_horizons() {
        let horizon =
            PricingHorizon::project(m(dec!(0.046)), Some(m(dec!(400))), Some(m(dec!(1100)))).unwrap();

        assert_eq!(horizon.daily, m(dec!(1.104)));
        assert_eq!(horizon.monthly, m(dec!(33.58)));
        // 0.046 * 8760 = 402.96
        assert_eq!(horizon.yearly, m(dec!(802.96)));
        assert_eq!(horizon.year_one, m(dec!(1902.96)));
        assert_eq!(horizon.year_three, m(dec!(3508.88)));
    }

    #[test]
    fn test_negative_inputs_rejected() {
        let err = PricingHorizon::project(m(dec!(-0.01)), None, None).unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput(_)));

        let err = PricingHorizon::project(m(dec!(1)), Some(m(dec!(-5))), None).unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput(_)));
    }

    #[test]
    fn test_scaled_rate() {
        let rate = BaseRate::hourly(m(dec!(0.192))).with_one_time(Some(m(dec!(10))), None);
        let scaled = rate.scaled(3).unwrap();

        assert_eq!(scaled.hourly, m(dec!(0.576)));
        assert_eq!(scaled.one_time_year1, Some(m(dec!(30))));
        assert_eq!(scaled.one_time_year3, None);
    }

    proptest! {
        #[test]
        fn prop_recurring_horizons_follow_hourly(cents in 0u64..10_000_000, fee in 0u64..1_000_000) {
            let hourly = m(Decimal::new(cents as i64, 4));
            let one_time = m(Decimal::new(fee as i64, 2));
            let horizon = PricingHorizon::project(hourly, Some(one_time), Some(one_time)).unwrap();

            prop_assert_eq!(horizon.daily.amount(), hourly.amount() * dec!(24));
            prop_assert_eq!(horizon.monthly.amount(), hourly.amount() * dec!(730));
            prop_assert_eq!(horizon.yearly.amount(), hourly.amount() * dec!(8760) + one_time.amount());
            prop_assert_eq!(horizon.year_one.amount(), horizon.yearly.amount() + one_time.amount());
            prop_assert_eq!(
                horizon.year_three.amount(),
                horizon.yearly.amount() * dec!(3) + one_time.amount()
            );
        }
    }
}
