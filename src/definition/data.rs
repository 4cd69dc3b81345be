//! Definition tree: definition -> service -> resource

use crate::error::{PricingError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

fn default_quantity() -> u32 {
    1
}

/// A priced resource within a service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSpec {
    /// Name shown in the report
    pub name: String,

    /// Rate lookup key; the name is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    /// Number of identical units
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl ResourceSpec {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            sku: None,
            quantity: 1,
        }
    }

    pub fn with_sku(mut self, sku: &str) -> Self {
        self.sku = Some(sku.to_string());
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Key used to look up the unit rate
    pub fn sku(&self) -> &str {
        self.sku.as_deref().unwrap_or(&self.name)
    }
}

/// A named service and the resources priced under it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    #[serde(default)]
    pub resources: Vec<ResourceSpec>,
}

impl Service {
    pub fn new(name: &str, resources: Vec<ResourceSpec>) -> Self {
        Self {
            name: name.to_string(),
            resources,
        }
    }
}

/// A top-level stack definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub name: String,
    #[serde(default)]
    pub services: Vec<Service>,
}

impl Definition {
    pub fn new(name: &str, services: Vec<Service>) -> Self {
        Self {
            name: name.to_string(),
            services,
        }
    }

    /// Check names are present and unique at each level and quantities are positive
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PricingError::invalid("definition name is blank"));
        }

        let mut services = HashSet::new();
        for service in &self.services {
            if service.name.trim().is_empty() {
                return Err(PricingError::invalid(format!(
                    "definition '{}' has a service with a blank name",
                    self.name
                )));
            }
            if !services.insert(service.name.as_str()) {
                return Err(PricingError::invalid(format!(
                    "definition '{}' lists service '{}' twice",
                    self.name, service.name
                )));
            }

            let mut resources = HashSet::new();
            for resource in &service.resources {
                if resource.name.trim().is_empty() || resource.sku().trim().is_empty() {
                    return Err(PricingError::invalid(format!(
                        "service '{}' in '{}' has a resource with a blank name or sku",
                        service.name, self.name
                    )));
                }
                if !resources.insert(resource.name.as_str()) {
                    return Err(PricingError::invalid(format!(
                        "service '{}' in '{}' lists resource '{}' twice",
                        service.name, self.name, resource.name
                    )));
                }
                if resource.quantity == 0 {
                    return Err(PricingError::invalid(format!(
                        "resource '{}' in service '{}' has zero quantity",
                        resource.name, service.name
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn service_names(&self) -> impl Iterator<Item = &str> {
        self.services.iter().map(|service| service.name.as_str())
    }

    pub fn resource_count(&self) -> usize {
        self.services.iter().map(|service| service.resources.len()).sum()
    }
}

/// Distinct service names across definitions, in first-seen order
pub fn distinct_services(definitions: &[Definition]) -> Vec<&str> {
    let mut seen = HashSet::new();
    definitions
        .iter()
        .flat_map(|definition| definition.service_names())
        .filter(|name| seen.insert(*name))
        .collect()
}
