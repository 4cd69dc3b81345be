//! Batch runner for calculating many definitions at once
//!
//! Definitions share nothing, so they are calculated in parallel. A failure
//! in one definition is reported in its outcome and never aborts the others.

use crate::definition::{distinct_services, Definition};
use crate::error::Result;
use crate::projection::{CalculationConfig, CalculationReport, ProjectionEngine};
use crate::rates::RateProvider;
use log::{info, warn};
use rayon::prelude::*;

/// Result of calculating one definition in a batch
#[derive(Debug)]
pub struct DefinitionOutcome {
    pub name: String,
    pub result: Result<CalculationReport>,
}

impl DefinitionOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Calculates batches of definitions against one rate provider
///
/// # Example
/// ```ignore
/// let runner = BatchRunner::new(RateTable::load_default()?, CalculationConfig::default());
/// for outcome in runner.run(&definitions) {
///     println!("{}: {:?}", outcome.name, outcome.result.map(|r| r.total.monthly));
/// }
/// ```
pub struct BatchRunner<P> {
    engine: ProjectionEngine<P>,
}

impl<P: RateProvider> BatchRunner<P> {
    pub fn new(provider: P, config: CalculationConfig) -> Self {
        Self {
            engine: ProjectionEngine::new(provider, config),
        }
    }

    pub fn with_engine(engine: ProjectionEngine<P>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &ProjectionEngine<P> {
        &self.engine
    }

    /// Every distinct service the definitions reference, in first-seen order,
    /// paired with whether the provider carries an offering for it
    pub fn offering_status<'d>(&self, definitions: &'d [Definition]) -> Vec<(&'d str, bool)> {
        distinct_services(definitions)
            .into_iter()
            .map(|service| {
                let loaded = self.engine.provider().has_offering(service);
                if loaded {
                    info!("Loaded offering {}", service);
                } else {
                    warn!("No offering loaded for {}", service);
                }
                (service, loaded)
            })
            .collect()
    }

    /// Services with no offering, in first-seen order
    pub fn preload_offerings<'d>(&self, definitions: &'d [Definition]) -> Vec<&'d str> {
        self.offering_status(definitions)
            .into_iter()
            .filter(|(_, loaded)| !loaded)
            .map(|(service, _)| service)
            .collect()
    }

    /// Calculate every definition; outcomes keep the input order
    pub fn run(&self, definitions: &[Definition]) -> Vec<DefinitionOutcome> {
        definitions
            .par_iter()
            .map(|definition| {
                let result = self.engine.calculate(definition);
                if let Err(e) = &result {
                    warn!("Definition '{}' failed: {}", definition.name, e);
                }
                DefinitionOutcome {
                    name: definition.name.clone(),
                    result,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{ResourceSpec, Service};
    use crate::error::PricingError;
    use crate::money::Money;
    use crate::pricing::BaseRate;
    use crate::rates::RateTable;
    use rust_decimal_macros::dec;

    fn runner() -> BatchRunner<RateTable> {
        let mut table = RateTable::new();
        table
            .insert("Compute", "small", BaseRate::hourly(Money::new(dec!(1))))
            .unwrap();
        BatchRunner::new(table, CalculationConfig::default())
    }

    fn definition(name: &str, service: &str, resource: &str) -> Definition {
        Definition::new(name, vec![Service::new(service, vec![ResourceSpec::new(resource)])])
    }

    #[test]
    fn test_failure_isolated_per_definition() {
        let definitions = vec![
            definition("First", "Compute", "small"),
            definition("Broken", "Compute", "missing"),
            definition("Last", "Compute", "small"),
        ];

        let outcomes = runner().run(&definitions);
        let names: Vec<_> = outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Broken", "Last"]);

        assert!(outcomes[0].is_ok());
        assert!(matches!(
            outcomes[1].result,
            Err(PricingError::RateNotFound { .. })
        ));
        let last = outcomes[2].result.as_ref().unwrap();
        assert_eq!(last.total.monthly, Money::new(dec!(803)));
    }

    #[test]
    fn test_default_fixtures() {
        let definitions = crate::definition::load_default_definitions().unwrap();
        let runner = BatchRunner::new(RateTable::load_default().unwrap(), CalculationConfig::default());

        assert!(runner.preload_offerings(&definitions).is_empty());
        let outcomes = runner.run(&definitions);
        assert!(outcomes.iter().all(DefinitionOutcome::is_ok));

        for outcome in &outcomes {
            let report = outcome.result.as_ref().unwrap();
            assert_eq!(
                report.total.monthly.amount(),
                report.aggregate.monthly.amount() + report.support.monthly.amount()
            );
        }

        let reserved = outcomes[1].result.as_ref().unwrap();
        assert_eq!(reserved.aggregate.monthly, Money::new(dec!(104.025)));
        assert_eq!(reserved.aggregate.one_time_year1, Money::new(dec!(4045)));
        assert_eq!(reserved.support.one_time_year1, Money::new(dec!(404.5)));
        assert_eq!(reserved.support.one_time_year3, Money::new(dec!(75)));
        assert_eq!(reserved.total.monthly.to_fixed(), "114.43");
    }

    #[test]
    fn test_preload_reports_missing_offerings() {
        let definitions = vec![
            definition("A", "Compute", "small"),
            definition("B", "Storage", "bucket"),
            definition("C", "Storage", "archive"),
        ];

        assert_eq!(runner().preload_offerings(&definitions), vec!["Storage"]);
    }

    #[test]
    fn test_offering_status_covers_every_service() {
        let definitions = vec![
            definition("A", "Compute", "small"),
            definition("B", "Storage", "bucket"),
            definition("C", "Compute", "small"),
        ];

        assert_eq!(
            runner().offering_status(&definitions),
            vec![("Compute", true), ("Storage", false)]
        );
    }
}
