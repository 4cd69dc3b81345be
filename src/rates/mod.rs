//! Rate providers: the source of base prices for resources

mod table;

pub use table::{RateTable, DEFAULT_RATES_PATH};

use crate::definition::ResourceSpec;
use crate::error::Result;
use crate::pricing::BaseRate;

/// Supplies resolved base rates for resources of a service
pub trait RateProvider: Sync {
    /// Rate for the given resource (already scaled by its quantity), or
    /// `RateNotFound`
    fn lookup_rate(&self, service: &str, resource: &ResourceSpec) -> Result<BaseRate>;

    /// Whether the provider carries any prices for `service`
    fn has_offering(&self, _service: &str) -> bool {
        true
    }
}

impl<P: RateProvider + ?Sized> RateProvider for &P {
    fn lookup_rate(&self, service: &str, resource: &ResourceSpec) -> Result<BaseRate> {
        (**self).lookup_rate(service, resource)
    }

    fn has_offering(&self, service: &str) -> bool {
        (**self).has_offering(service)
    }
}
