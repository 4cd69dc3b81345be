//! Tiered support surcharge
//!
//! The support fee is computed from a descending table of (threshold, rate)
//! bands. Starting from the full amount, each band whose threshold has been
//! reached charges its rate on everything above the threshold, and that excess
//! is then consumed so the next band only sees the threshold amount.
//!
//! With the standard table, a monthly spend of 300,000 is charged as
//! 50,000 @ 3% + 170,000 @ 5% + 70,000 @ 7% + 10,000 @ 10% = 15,900.

use super::horizon::{PricingHorizon, HOURS_PER_MONTH, MONTHS_PER_YEAR, TERM_YEARS};
use crate::error::{PricingError, Result};
use crate::money::{self, Money};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

/// One (threshold, rate) band of a support schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportBand {
    pub threshold: Money,
    pub rate: Decimal,
}

impl SupportBand {
    pub fn new(threshold: Money, rate: Decimal) -> Self {
        Self { threshold, rate }
    }
}

/// Charge contributed by one band for a given amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BandCharge {
    pub threshold: Money,
    pub rate: Decimal,
    /// Amount above the threshold consumed by this band
    pub portion: Money,
    pub charge: Money,
}

/// Descending progressive-rate schedule used for support fees
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportSchedule {
    bands: Vec<SupportBand>,
}

impl SupportSchedule {
    /// Build a schedule, checking that thresholds strictly descend to a final
    /// zero band and that every rate lies in [0, 1]
    pub fn new(bands: Vec<SupportBand>) -> Result<Self> {
        let last = bands
            .last()
            .ok_or_else(|| PricingError::invalid("support schedule has no bands"))?;
        if !last.threshold.is_zero() {
            return Err(PricingError::invalid(format!(
                "last support band must start at 0, found {}",
                last.threshold
            )));
        }

        for pair in bands.windows(2) {
            if pair[0].threshold <= pair[1].threshold {
                return Err(PricingError::invalid(format!(
                    "support thresholds must strictly descend ({} then {})",
                    pair[0].threshold, pair[1].threshold
                )));
            }
        }

        for band in &bands {
            band.threshold.ensure_non_negative("support threshold")?;
            if band.rate < Decimal::ZERO || band.rate > Decimal::ONE {
                return Err(PricingError::invalid(format!(
                    "support rate {} at threshold {} is outside [0, 1]",
                    band.rate, band.threshold
                )));
            }
        }

        Ok(Self { bands })
    }

    /// The standard four-band table
    pub fn standard() -> Self {
        Self {
            bands: vec![
                SupportBand::new(Money::new(dec!(250000)), dec!(0.03)),
                SupportBand::new(Money::new(dec!(80000)), dec!(0.05)),
                SupportBand::new(Money::new(dec!(10000)), dec!(0.07)),
                SupportBand::new(Money::ZERO, dec!(0.10)),
            ],
        }
    }

    /// Load a schedule from a `threshold,rate` CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_reader(File::open(path)?)
    }

    /// Load a schedule from any `threshold,rate` CSV source
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(reader);
        let mut bands = Vec::new();

        for result in reader.records() {
            let record = result?;
            let threshold: Money = field(&record, 0, "threshold")?.parse()?;
            let rate = Decimal::from_str(field(&record, 1, "rate")?.trim()).map_err(|e| {
                PricingError::invalid(format!("bad support rate in {:?}: {}", record, e))
            })?;
            bands.push(SupportBand::new(threshold, rate));
        }

        Self::new(bands)
    }

    pub fn bands(&self) -> &[SupportBand] {
        &self.bands
    }

    /// Per-band charges for `amount`, skipping bands whose threshold is
    /// above the amount still remaining
    pub fn breakdown(&self, amount: Money) -> Result<Vec<BandCharge>> {
        let mut remaining = amount.ensure_non_negative("support basis")?;
        let mut charges = Vec::with_capacity(self.bands.len());

        for band in &self.bands {
            if band.threshold > remaining {
                continue;
            }

            let portion = money::sub(remaining, band.threshold)?;
            let charge = money::mul(portion, band.rate)?;
            remaining = money::sub(remaining, portion)?;

            charges.push(BandCharge {
                threshold: band.threshold,
                rate: band.rate,
                portion,
                charge,
            });
        }

        Ok(charges)
    }

    /// Total support surcharge on `amount`
    pub fn surcharge(&self, amount: Money) -> Result<Money> {
        self.breakdown(amount)?
            .iter()
            .try_fold(Money::ZERO, |total, band| money::add(total, band.charge))
    }

    /// Support horizon for an aggregated spend
    ///
    /// The monthly figure and both one-time fees are surcharged independently
    /// with the same table. Hourly is the implied rate (monthly / 730,
    /// truncated to `division_scale` digits) and daily follows from it. Monthly
    /// and the yearly horizons stay exact: yearly is monthly * 12 plus the
    /// one-time 1yr surcharge.
    pub fn support_horizon(
        &self,
        aggregate: &PricingHorizon,
        division_scale: u32,
    ) -> Result<PricingHorizon> {
        let monthly = self.surcharge(aggregate.monthly)?;
        let one_time_year1 = self.surcharge(aggregate.one_time_year1)?;
        let one_time_year3 = self.surcharge(aggregate.one_time_year3)?;

        let hourly = money::div(monthly, HOURS_PER_MONTH, division_scale)?;
        let mut support =
            PricingHorizon::project(hourly, Some(one_time_year1), Some(one_time_year3))?;
        support.monthly = monthly;
        support.yearly = money::add(money::mul(monthly, MONTHS_PER_YEAR)?, one_time_year1)?;
        support.year_one = money::add(support.yearly, one_time_year3)?;
        support.year_three =
            money::add(money::mul(support.yearly, TERM_YEARS)?, one_time_year3)?;

        Ok(support)
    }
}

impl Default for SupportSchedule {
    fn default() -> Self {
        Self::standard()
    }
}

fn field<'r>(record: &'r csv::StringRecord, index: usize, name: &str) -> Result<&'r str> {
    record
        .get(index)
        .ok_or_else(|| PricingError::invalid(format!("missing {} column in {:?}", name, record)))
}
