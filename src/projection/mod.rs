//! Projection driver for stack definitions

mod engine;
mod report;

pub use engine::{CalculationConfig, ProjectionEngine};
pub use report::{CalculationReport, ServicePricing};
