//! Error types for pricing calculations

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, PricingError>;

/// Errors raised while loading pricing inputs or calculating a definition
#[derive(Error, Debug)]
pub enum PricingError {
    /// Negative amounts, malformed definitions, bad schedules
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The rate provider has no price for the requested resource
    #[error("Rate not found for {service}/{resource}")]
    RateNotFound { service: String, resource: String },

    /// A decimal operation could not be represented exactly
    #[error("Precision policy violated: {0}")]
    PrecisionPolicyViolation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PricingError {
    pub fn invalid(message: impl Into<String>) -> Self {
        PricingError::InvalidInput(message.into())
    }

    pub fn rate_not_found(service: &str, resource: &str) -> Self {
        PricingError::RateNotFound {
            service: service.to_string(),
            resource: resource.to_string(),
        }
    }
}
