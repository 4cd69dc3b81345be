//! Calculation output structures

use crate::pricing::{PricingGroup, PricingHorizon};
use serde::{Deserialize, Serialize};

/// Resources of one service with their projected pricing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePricing {
    /// Service name
    pub name: String,

    /// Projected pricing per resource, in definition order
    pub resources: PricingGroup,

    /// Aggregate of all resources
    pub subtotal: PricingHorizon,
}

/// Fully resolved pricing for one definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationReport {
    /// Definition name
    pub definition: String,

    /// Per-service breakdown
    pub services: Vec<ServicePricing>,

    /// Service subtotals keyed by service name
    pub service_totals: PricingGroup,

    /// Aggregate of every service, before support
    pub aggregate: PricingHorizon,

    /// Support surcharge derived from the aggregate
    pub support: PricingHorizon,

    /// Service subtotals plus support
    pub total: PricingHorizon,
}

impl CalculationReport {
    pub fn service(&self, name: &str) -> Option<&ServicePricing> {
        self.services.iter().find(|service| service.name == name)
    }

    pub fn resource_count(&self) -> usize {
        self.services.iter().map(|service| service.resources.len()).sum()
    }
}
