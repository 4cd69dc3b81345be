//! Projection driver: walks a definition and builds its pricing report

use super::report::{CalculationReport, ServicePricing};
use crate::definition::{Definition, Service};
use crate::error::Result;
use crate::money::DIVISION_SCALE;
use crate::pricing::{aggregate, PricingGroup, PricingHorizon, SupportSchedule};
use crate::rates::RateProvider;
use log::{debug, info};
use std::iter;

/// Configuration for a calculation run
#[derive(Debug, Clone)]
pub struct CalculationConfig {
    /// Support surcharge table
    pub support: SupportSchedule,

    /// Fractional digits kept when deriving hourly support from monthly
    pub division_scale: u32,
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self {
            support: SupportSchedule::standard(),
            division_scale: DIVISION_SCALE,
        }
    }
}

impl CalculationConfig {
    pub fn with_support(mut self, support: SupportSchedule) -> Self {
        self.support = support;
        self
    }
}

/// Main projection engine
pub struct ProjectionEngine<P> {
    provider: P,
    config: CalculationConfig,
}

impl<P: RateProvider> ProjectionEngine<P> {
    /// Create a new engine over a rate provider
    pub fn new(provider: P, config: CalculationConfig) -> Self {
        Self { provider, config }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &CalculationConfig {
        &self.config
    }

    /// Calculate every horizon, the support surcharge and the total for one
    /// definition. Any missing rate fails the whole definition.
    pub fn calculate(&self, definition: &Definition) -> Result<CalculationReport> {
        definition.validate()?;
        info!(
            "Calculating '{}' ({} services, {} resources)",
            definition.name,
            definition.services.len(),
            definition.resource_count()
        );

        let mut services = Vec::with_capacity(definition.services.len());
        let mut service_totals = PricingGroup::new();

        for service in &definition.services {
            let priced = self.price_service(service)?;
            service_totals.insert(&priced.name, priced.subtotal)?;
            services.push(priced);
        }

        let aggregate_pricing = service_totals.total()?;
        let support = self
            .config
            .support
            .support_horizon(&aggregate_pricing, self.config.division_scale)?;
        let total = aggregate(service_totals.horizons().chain(iter::once(&support)))?;

        info!(
            "'{}': monthly {} + support {} = {}",
            definition.name,
            aggregate_pricing.monthly.to_display(),
            support.monthly.to_display(),
            total.monthly.to_display()
        );

        Ok(CalculationReport {
            definition: definition.name.clone(),
            services,
            service_totals,
            aggregate: aggregate_pricing,
            support,
            total,
        })
    }

    /// Project every resource of a service and total them
    fn price_service(&self, service: &Service) -> Result<ServicePricing> {
        let mut resources = PricingGroup::new();

        for resource in &service.resources {
            let rate = self.provider.lookup_rate(&service.name, resource)?;
            let pricing = PricingHorizon::from_rate(&rate)?;
            debug!(
                "{}/{} x{}: hourly {} monthly {}",
                service.name,
                resource.sku(),
                resource.quantity,
                pricing.hourly,
                pricing.monthly
            );
            resources.insert(&resource.name, pricing)?;
        }

        let subtotal = resources.total()?;
        debug!("{} subtotal: monthly {}", service.name, subtotal.monthly);

        Ok(ServicePricing {
            name: service.name.clone(),
            resources,
            subtotal,
        })
    }
}
