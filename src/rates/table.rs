//! In-memory rate table loaded from CSV

use super::RateProvider;
use crate::definition::ResourceSpec;
use crate::error::{PricingError, Result};
use crate::money::Money;
use crate::pricing::BaseRate;
use csv::Reader;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Default location of the rate table
pub const DEFAULT_RATES_PATH: &str = "data/rates.csv";

/// Raw CSV row matching rates.csv columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    service: String,
    resource: String,
    hourly: String,
    #[serde(default)]
    one_time_year1: Option<String>,
    #[serde(default)]
    one_time_year3: Option<String>,
}

impl CsvRow {
    fn to_rate(&self) -> Result<BaseRate> {
        Ok(BaseRate {
            hourly: self.hourly.parse()?,
            one_time_year1: optional_amount(&self.one_time_year1)?,
            one_time_year3: optional_amount(&self.one_time_year3)?,
        })
    }
}

fn optional_amount(value: &Option<String>) -> Result<Option<Money>> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text.parse().map(Some),
    }
}

/// Unit rates keyed by (service, sku)
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rates: HashMap<(String, String), BaseRate>,
    services: HashSet<String>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a unit rate, rejecting negative prices and duplicate keys
    pub fn insert(&mut self, service: &str, sku: &str, rate: BaseRate) -> Result<()> {
        rate.hourly.ensure_non_negative("hourly rate")?;
        for fee in [rate.one_time_year1, rate.one_time_year3].into_iter().flatten() {
            fee.ensure_non_negative("one-time fee")?;
        }

        let key = (service.to_string(), sku.to_string());
        if self.rates.contains_key(&key) {
            return Err(PricingError::invalid(format!(
                "duplicate rate for {}/{}",
                service, sku
            )));
        }

        self.services.insert(service.to_string());
        self.rates.insert(key, rate);
        Ok(())
    }

    /// Load all rates from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = Reader::from_path(path)?;
        Self::from_csv_reader(reader)
    }

    /// Load rates from any reader (e.g., string buffer)
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        Self::from_csv_reader(Reader::from_reader(reader))
    }

    /// Load rates from the default location
    pub fn load_default() -> Result<Self> {
        Self::from_csv(DEFAULT_RATES_PATH)
    }

    fn from_csv_reader<R: std::io::Read>(mut reader: Reader<R>) -> Result<Self> {
        let mut table = Self::new();

        for result in reader.deserialize() {
            let row: CsvRow = result?;
            let rate = row.to_rate()?;
            table.insert(&row.service, &row.resource, rate)?;
        }

        Ok(table)
    }

    /// Unit rate for a sku, before quantity scaling
    pub fn unit_rate(&self, service: &str, sku: &str) -> Option<&BaseRate> {
        self.rates.get(&(service.to_string(), sku.to_string()))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl RateProvider for RateTable {
    fn lookup_rate(&self, service: &str, resource: &ResourceSpec) -> Result<BaseRate> {
        self.unit_rate(service, resource.sku())
            .ok_or_else(|| PricingError::rate_not_found(service, resource.sku()))?
            .scaled(resource.quantity)
    }

    fn has_offering(&self, service: &str) -> bool {
        self.services.contains(service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const RATES: &str = "\
service,resource,hourly,one_time_year1,one_time_year3
AmazonEC2,m5.xlarge,0.192,,
AmazonEC2,m5.xlarge-ri,0.046,400,1100
AmazonRDS,db.m5.large,0.171,,
";

    #[test]
    fn test_lookup_scales_by_quantity() {
        let table = RateTable::from_reader(RATES.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);

        let resource = ResourceSpec::new("web").with_sku("m5.xlarge").with_quantity(2);
        let rate = table.lookup_rate("AmazonEC2", &resource).unwrap();
        assert_eq!(rate.hourly, Money::new(dec!(0.384)));
        assert_eq!(rate.one_time_year1, None);

        let reserved = ResourceSpec::new("m5.xlarge-ri");
        let rate = table.lookup_rate("AmazonEC2", &reserved).unwrap();
        assert_eq!(rate.one_time_year1, Some(Money::new(dec!(400))));
        assert_eq!(rate.one_time_year3, Some(Money::new(dec!(1100))));
    }

    #[test]
    fn test_missing_rate() {
        let table = RateTable::from_reader(RATES.as_bytes()).unwrap();
        let err = table
            .lookup_rate("AmazonRDS", &ResourceSpec::new("db.r5.xlarge"))
            .unwrap_err();

        match err {
            PricingError::RateNotFound { service, resource } => {
                assert_eq!(service, "AmazonRDS");
                assert_eq!(resource, "db.r5.xlarge");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_offerings() {
        let table = RateTable::from_reader(RATES.as_bytes()).unwrap();
        assert!(table.has_offering("AmazonEC2"));
        assert!(!table.has_offering("AmazonS3"));
    }

    #[test]
    fn test_rejects_duplicates_and_negative_rates() {
        let duplicate = format!("{}AmazonEC2,m5.xlarge,0.2,,\n", RATES);
        assert!(RateTable::from_reader(duplicate.as_bytes()).is_err());

        let negative = "service,resource,hourly,one_time_year1,one_time_year3\nAmazonEC2,x,-1,,\n";
        assert!(matches!(
            RateTable::from_reader(negative.as_bytes()),
            Err(PricingError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_load_default_rates() {
        let table = RateTable::load_default().expect("Failed to load rates");
        assert!(!table.is_empty());
        assert!(table.has_offering("AmazonEC2"));
        assert!(table.unit_rate("AmazonEC2", "m5.xlarge").is_some());
    }
}
