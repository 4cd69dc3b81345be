//! Horizon-wise aggregation of many priced items

use super::horizon::PricingHorizon;
use crate::error::{PricingError, Result};
use serde::{Deserialize, Serialize};

/// Sum every field of the given horizons independently
///
/// An empty input yields the all-zero horizon.
pub fn aggregate<'a, I>(horizons: I) -> Result<PricingHorizon>
where
    I: IntoIterator<Item = &'a PricingHorizon>,
{
    horizons
        .into_iter()
        .try_fold(PricingHorizon::zero(), |total, item| total.checked_add(item))
}

/// One named entry of a pricing group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingEntry {
    pub name: String,
    pub pricing: PricingHorizon,
}

/// Ordered mapping from item name to its projected horizon
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PricingGroup {
    entries: Vec<PricingEntry>,
}

impl PricingGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, rejecting names already present
    pub fn insert(&mut self, name: &str, pricing: PricingHorizon) -> Result<()> {
        if self.get(name).is_some() {
            return Err(PricingError::invalid(format!(
                "duplicate entry '{}' in pricing group",
                name
            )));
        }
        self.entries.push(PricingEntry {
            name: name.to_string(),
            pricing,
        });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&PricingHorizon> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.pricing)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PricingEntry> {
        self.entries.iter()
    }

    pub fn horizons(&self) -> impl Iterator<Item = &PricingHorizon> {
        self.entries.iter().map(|entry| &entry.pricing)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Aggregate of every entry
    pub fn total(&self) -> Result<PricingHorizon> {
        aggregate(self.horizons())
    }
}
