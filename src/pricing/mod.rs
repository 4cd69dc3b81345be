//! Horizon projection, aggregation and support surcharges

mod horizon;
mod aggregate;
mod surcharge;

pub use horizon::{
    BaseRate, PricingHorizon, DAYS_PER_YEAR, HOURS_PER_DAY, HOURS_PER_MONTH, MONTHS_PER_YEAR,
    TERM_YEARS,
};
pub use aggregate::{aggregate, PricingEntry, PricingGroup};
pub use surcharge::{BandCharge, SupportBand, SupportSchedule};
