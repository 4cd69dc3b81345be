//! Cloud Pricing - exact cost projections for cloud service definitions
//!
//! This library provides:
//! - Exact decimal money arithmetic
//! - Hourly to daily, monthly, yearly and multi-year cost projections
//! - Horizon-wise aggregation of resources, services and definitions
//! - Tiered support surcharges on aggregated spend
//! - Batch calculation of many definitions against one rate table

pub mod error;
pub mod money;
pub mod pricing;
pub mod definition;
pub mod rates;
pub mod projection;
pub mod batch;
pub mod output;

// Re-export commonly used types
pub use error::{PricingError, Result};
pub use money::Money;
pub use pricing::{BaseRate, PricingGroup, PricingHorizon, SupportSchedule};
pub use definition::{Definition, ResourceSpec, Service};
pub use rates::{RateProvider, RateTable};
pub use projection::{CalculationConfig, CalculationReport, ProjectionEngine};
pub use batch::{BatchRunner, DefinitionOutcome};
